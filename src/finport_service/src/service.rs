use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use finport_adapters::config::AllowedOrigins;
use finport_axum::AppState;
use finport_axum::routes::{
    create_user, health, logout, profile, request_otp, reset_password, root, signin,
    stock_candles, stock_price, verify_auth, verify_otp, ws_handler,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main backend service wiring every route onto the shared state.
pub struct FinportService {
    router: Router,
}

impl FinportService {
    pub fn new(state: AppState) -> Self {
        let user_routes = Router::new()
            .route("/request-otp", post(request_otp))
            .route("/verify-otp", post(verify_otp))
            .route("/create-user", post(create_user))
            .route("/signin", post(signin))
            .route("/reset-password", post(reset_password))
            .route("/logout", post(logout))
            .route("/verify-auth", get(verify_auth))
            .route("/profile", get(profile));

        let stock_routes = Router::new()
            .route("/price", get(stock_price))
            .route("/candles", get(stock_candles));

        let router = Router::new()
            .route("/", get(root))
            .route("/health", get(health))
            .route("/ws", get(ws_handler))
            .nest("/api/user", user_routes)
            .nest("/api/stock", stock_routes)
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a plain router, optionally behind a
    /// credentialed CORS allow-list.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the backend as a standalone server.
    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("FinPort backend listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
