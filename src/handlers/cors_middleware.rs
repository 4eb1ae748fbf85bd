use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, warn};

use crate::AppState;

/// Origins allowed to call the relay. An origin passes when it equals an entry
/// or starts with one.
#[derive(Clone, Debug)]
pub struct OriginAllowList {
    origins: Arc<[String]>,
}

impl OriginAllowList {
    pub fn new(origins: Vec<String>) -> Self {
        Self {
            origins: origins.into(),
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.origins
            .iter()
            .any(|allowed| origin == allowed || origin.starts_with(allowed.as_str()))
    }

    pub fn allows_header(&self, origin: &HeaderValue) -> bool {
        origin.to_str().map(|o| self.allows(o)).unwrap_or(false)
    }
}

/// Rejects browser requests from unknown origins before they reach a handler.
/// Requests without an `Origin` header (curl, uptime checks) always pass.
pub async fn origin_guard(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if !state.allowed_origins.allows_header(origin) {
            let shown = String::from_utf8_lossy(origin.as_bytes()).into_owned();
            warn!(origin = %shown, path = %request.uri().path(), "Rejected request from origin");
            let body = format!("Not allowed by CORS: {}", shown);
            return (StatusCode::FORBIDDEN, body).into_response();
        }
    }

    // Preflights carry Access-Control-Request-Method and are answered by the
    // cors layer; any other OPTIONS gets an empty 204.
    if request.method() == Method::OPTIONS
        && !request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
    {
        debug!("Answering bare OPTIONS for {}", request.uri().path());
        return StatusCode::NO_CONTENT.into_response();
    }

    next.run(request).await
}

pub fn cors_layer(allowed: OriginAllowList) -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _parts| {
            allowed.allows_header(origin)
        }))
}
