pub mod in_memory_cooldown_tracker;
pub mod in_memory_otp_store;
pub mod in_memory_user_store;
pub mod password_hash;
pub mod postgres_user_store;
pub mod redis_cooldown_tracker;
pub mod redis_otp_store;

pub use in_memory_cooldown_tracker::InMemoryCooldownTracker;
pub use in_memory_otp_store::InMemoryOtpStore;
pub use in_memory_user_store::InMemoryUserStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_cooldown_tracker::RedisCooldownTracker;
pub use redis_otp_store::RedisOtpStore;
