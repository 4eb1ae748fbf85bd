use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    error::ApiError,
    handlers::form_dtos::{ContactRequest, FaqRequest, TestimonialRequest, WaitlistRequest},
    utils::mailer::OutgoingMail,
    AppState,
};

pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// A missing or malformed body is treated as `{}` so it fails field
/// validation with a 400 instead of an extractor rejection.
fn body_or_default<T: DeserializeOwned + Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!("Unreadable form body, treating as empty: {}", rejection);
            T::default()
        }
    }
}

async fn relay(state: &AppState, mail: OutgoingMail) -> Result<Json<Value>, ApiError> {
    let subject = mail.subject.clone();
    state.mailer.send(mail).await?;
    tracing::info!("Email sent successfully: {}", subject);
    Ok(Json(json!({ "ok": true })))
}

pub async fn submit_faq(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FaqRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mail = body_or_default(payload).into_mail()?;
    relay(&state, mail).await
}

pub async fn submit_testimonial(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TestimonialRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mail = body_or_default(payload).into_mail()?;
    relay(&state, mail).await
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mail = body_or_default(payload).into_mail()?;
    relay(&state, mail).await
}

pub async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WaitlistRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mail = body_or_default(payload).into_mail()?;
    relay(&state, mail).await
}
