use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod error;
pub mod handlers {
    pub mod cors_middleware;
    pub mod form_dtos;
    pub mod form_handlers;
}
pub mod utils {
    pub mod mailer;
}
pub mod sequencer {
    pub mod easing;
    pub mod frame;
    pub mod pinning;
    pub mod scenes;
    pub mod smoothing;
    pub mod tuning;
    mod driver;
    pub use driver::{FrameOutcome, ScrollOutcome, Sequencer};
}

use handlers::cors_middleware::{self, OriginAllowList};
use handlers::form_handlers;
use utils::mailer::Mailer;

pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
    pub allowed_origins: OriginAllowList,
}

pub fn app(state: Arc<AppState>) -> Router {
    let form_routes = Router::new()
        .route("/api/faq", post(form_handlers::submit_faq))
        .route("/api/testimonials", post(form_handlers::submit_testimonial))
        .route("/api/contact", post(form_handlers::submit_contact))
        .route("/api/waitlist", post(form_handlers::join_waitlist));

    Router::new()
        .route("/health", get(form_handlers::health))
        .merge(form_routes)
        .layer(cors_middleware::cors_layer(state.allowed_origins.clone()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            cors_middleware::origin_guard,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                // MAIL_FAIL is already reported at ERROR by the handler
                .on_failure(DefaultOnFailure::new().level(Level::WARN)),
        )
        .with_state(state)
}
