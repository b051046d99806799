//! # ContactService
//!
//! Accepts reader messages from the public contact form and hands them to the
//! store. No authentication on submission; listing is for operators.

use std::sync::Arc;

use chrono::Utc;
use domains::{AppError, ContactDraft, ContactMessage, ContactRepo, Result};
use uuid::Uuid;

#[derive(Clone)]
pub struct ContactService {
    repo: Arc<dyn ContactRepo>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepo>) -> Self {
        Self { repo }
    }

    pub async fn submit(&self, draft: ContactDraft) -> Result<ContactMessage> {
        let missing = missing_fields(&draft);
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        // Presence is the whole contract here; the mail pipeline downstream
        // owns anything stricter.
        let message = ContactMessage {
            id: Uuid::now_v7(),
            name: draft.name.trim().to_owned(),
            email: draft.email.trim().to_owned(),
            subject: draft.subject.trim().to_owned(),
            message: draft.message,
            created_at: Utc::now(),
        };
        self.repo.insert(&message).await?;
        tracing::info!(message = %message.id, "contact message received");
        Ok(message)
    }

    /// Stored messages, newest first.
    pub async fn list(&self) -> Result<Vec<ContactMessage>> {
        self.repo.list_recent().await
    }
}

fn missing_fields(draft: &ContactDraft) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if draft.name.trim().is_empty() {
        missing.push("name");
    }
    if draft.email.trim().is_empty() {
        missing.push("email");
    }
    if draft.subject.trim().is_empty() {
        missing.push("subject");
    }
    if draft.message.trim().is_empty() {
        missing.push("message");
    }
    missing
}
