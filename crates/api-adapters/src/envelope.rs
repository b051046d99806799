//! The success envelope used by every 2xx response.
//!
//! Listings carry paging totals; single-document responses carry only
//! `data`; a few endpoints add a human-readable `message`. Absent members
//! are omitted from the JSON entirely, not serialized as null.

use domains::Page;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope {
            success: true,
            message: None,
            count: None,
            total: None,
            pages: None,
            current_page: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> Envelope<Vec<T>> {
    /// A paginated listing: `count` is this slice, `total` the whole result.
    pub fn paged(page: Page<T>) -> Self {
        Envelope {
            success: true,
            message: None,
            count: Some(page.items.len()),
            total: Some(page.total),
            pages: Some(page.pages),
            current_page: Some(page.page),
            data: Some(page.items),
        }
    }

    /// An unpaginated listing: just `count` and `data`.
    pub fn listed(items: Vec<T>) -> Self {
        Envelope {
            success: true,
            message: None,
            count: Some(items.len()),
            total: None,
            pages: None,
            current_page: None,
            data: Some(items),
        }
    }
}

impl Envelope<()> {
    /// Message-only acknowledgement, e.g. after a delete.
    pub fn message(message: impl Into<String>) -> Self {
        Envelope {
            success: true,
            message: Some(message.into()),
            count: None,
            total: None,
            pages: None,
            current_page: None,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_envelope_carries_every_paging_key() {
        let page = Page::new(vec!["a", "b"], 25, 3, 10);
        let value = serde_json::to_value(Envelope::paged(page)).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 2);
        assert_eq!(value["total"], 25);
        assert_eq!(value["pages"], 3);
        assert_eq!(value["currentPage"], 3);
        assert_eq!(value["data"][0], "a");
        assert!(value.get("message").is_none());
    }

    #[test]
    fn data_envelope_omits_paging_keys() {
        let value = serde_json::to_value(Envelope::data("x")).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], "x");
        for absent in ["count", "total", "pages", "currentPage", "message"] {
            assert!(value.get(absent).is_none(), "{absent} should be absent");
        }
    }

    #[test]
    fn message_envelope_has_no_data() {
        let value = serde_json::to_value(Envelope::message("done")).unwrap();
        assert_eq!(value["message"], "done");
        assert!(value.get("data").is_none());
    }
}
