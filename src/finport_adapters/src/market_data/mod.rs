pub mod finnhub_client;

pub use finnhub_client::FinnhubClient;
