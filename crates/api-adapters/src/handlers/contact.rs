//! Handlers for the contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use domains::{ContactDraft, ContactMessage};

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::extract::AuthPrincipal;
use crate::state::AppState;

/// Accepts a contact-form submission (`POST /api/contact`); open to
/// anonymous readers.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(draft): Json<ContactDraft>,
) -> ApiResult<(StatusCode, Json<Envelope<ContactMessage>>)> {
    let message = state.contact.submit(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(message).with_message("Contact message sent successfully")),
    ))
}

/// Lists stored messages, newest first (`GET /api/contact`). Requires a
/// token; any verified principal may read them.
pub async fn list_contacts(
    State(state): State<AppState>,
    AuthPrincipal(_me): AuthPrincipal,
) -> ApiResult<Json<Envelope<Vec<ContactMessage>>>> {
    Ok(Json(Envelope::listed(state.contact.list().await?)))
}
