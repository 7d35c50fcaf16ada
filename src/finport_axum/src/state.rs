use std::sync::Arc;

use finport_adapters::session::SessionConfig;
use finport_core::{CooldownTracker, EmailClient, MarketDataClient, OtpStore, UserStore};

/// Shared application state injected into every route.
///
/// The stores are owned components constructed at startup and injected here,
/// never ambient globals, so tests can build isolated instances.
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub otp_store: Arc<dyn OtpStore>,
    pub cooldown: Arc<dyn CooldownTracker>,
    pub email_client: Arc<dyn EmailClient>,
    pub market_data: Arc<dyn MarketDataClient>,
    pub session_config: SessionConfig,
}
