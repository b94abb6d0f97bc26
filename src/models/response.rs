use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A full response snapshot as stored in a cache generation.
///
/// Entries are immutable once stored but may be overwritten wholesale by a
/// later store for the same key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub fetched_at: DateTime<Utc>,
}

impl ResponseSnapshot {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
            fetched_at: Utc::now(),
        }
    }

    /// A 200 response with the given body, no headers.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, Vec::new(), body.into())
    }

    /// The synthesized degraded response returned when the network is down
    /// and nothing useful is cached.
    pub fn service_unavailable() -> Self {
        Self::new(503, Vec::new(), b"Offline".to_vec())
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_minutes()
    }

    /// Body as UTF-8, lossy. Intended for logs and tests.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_range() {
        assert!(ResponseSnapshot::ok("hi").is_success());
        assert!(ResponseSnapshot::new(204, Vec::new(), Vec::new()).is_success());
        assert!(!ResponseSnapshot::new(404, Vec::new(), Vec::new()).is_success());
        assert!(!ResponseSnapshot::service_unavailable().is_success());
    }

    #[test]
    fn test_service_unavailable_shape() {
        let resp = ResponseSnapshot::service_unavailable();
        assert_eq!(resp.status, 503);
        assert_eq!(resp.body_text(), "Offline");
    }

    #[test]
    fn test_snapshot_serializes_with_timestamp() {
        let snap = ResponseSnapshot::ok("page");
        let json = serde_json::to_string(&snap).unwrap();
        let back: ResponseSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, 200);
        assert_eq!(back.body_text(), "page");
        assert!(back.age_minutes() <= 1);
    }
}
