//! Remote store capability and its HTTP implementation.
//!
//! The sync engine only sees the [`RemoteStore`] trait, so tests can inject
//! fakes and the engine never learns transport details.

use serde::Deserialize;
use std::fmt;

use crate::models::{Day, Entry, ValidationError};

/// Conjunction of optional exact-match constraints for a remote `list` call.
/// Omitted fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub week: Option<String>,
    pub day: Option<Day>,
}

/// Failure of a remote operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// No server URL configured; behaves like an unreachable server.
    NotConfigured,
    /// Network failure or non-success response.
    Transport(String),
    /// Entry rejected before it was ever sent.
    Validation(ValidationError),
    /// Delete requested without a usable id.
    MissingId,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::NotConfigured => {
                write!(f, "Sync not configured. Add server_url to config.")
            }
            RemoteError::Transport(e) => write!(f, "Transport error: {}", e),
            RemoteError::Validation(e) => write!(f, "Validation error: {}", e),
            RemoteError::MissingId => write!(f, "Delete requires a non-empty id"),
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<ValidationError> for RemoteError {
    fn from(e: ValidationError) -> Self {
        RemoteError::Validation(e)
    }
}

/// The remote persistence capability: insert-or-replace keyed by id, listing
/// with an optional filter, idempotent delete.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Entry>, RemoteError>;
    async fn upsert(&self, entry: &Entry) -> Result<(), RemoteError>;
    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    ok: bool,
    #[serde(default)]
    data: Vec<Entry>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the entries API.
///
/// The endpoint serves `GET/POST/DELETE {base}/api/entries` with an
/// `{ ok, data?, error? }` JSON envelope and orders list results by date
/// descending, then insertion time descending.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    base_url: Option<String>,
    client: reqwest::Client,
}

impl HttpRemote {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn entries_url(&self) -> Result<String, RemoteError> {
        let base = self.base_url.as_deref().ok_or(RemoteError::NotConfigured)?;
        Ok(format!("{}/api/entries", base.trim_end_matches('/')))
    }

    async fn ack(response: reqwest::Response) -> Result<(), RemoteError> {
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Transport(format!("server returned {}", status)));
        }
        let body: AckEnvelope = response
            .json()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        if body.ok {
            Ok(())
        } else {
            Err(RemoteError::Transport(
                body.error.unwrap_or_else(|| "server error".to_string()),
            ))
        }
    }
}

impl RemoteStore for HttpRemote {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Entry>, RemoteError> {
        let url = self.entries_url()?;
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(week) = &filter.week {
            query.push(("week", week.clone()));
        }
        if let Some(day) = filter.day {
            query.push(("day", day.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Transport(format!("server returned {}", status)));
        }
        let body: ListEnvelope = response
            .json()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        if body.ok {
            Ok(body.data)
        } else {
            Err(RemoteError::Transport(
                body.error.unwrap_or_else(|| "server error".to_string()),
            ))
        }
    }

    async fn upsert(&self, entry: &Entry) -> Result<(), RemoteError> {
        entry.validate()?;
        let url = self.entries_url()?;
        let response = self
            .client
            .post(&url)
            .json(entry)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Self::ack(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        if id.trim().is_empty() {
            return Err(RemoteError::MissingId);
        }
        let url = self.entries_url()?;
        let response = self
            .client
            .delete(&url)
            .query(&[("id", id)])
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Self::ack(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;
    use chrono::NaiveDate;

    #[test]
    fn test_entries_url_strips_trailing_slash() {
        let remote = HttpRemote::new(Some("http://localhost:3000/".to_string()));
        assert_eq!(
            remote.entries_url().unwrap(),
            "http://localhost:3000/api/entries"
        );
    }

    #[test]
    fn test_unconfigured_remote() {
        let remote = HttpRemote::new(None);
        assert!(!remote.is_configured());
        assert_eq!(remote.entries_url().unwrap_err(), RemoteError::NotConfigured);
    }

    #[tokio::test]
    async fn test_upsert_rejects_invalid_entry_before_sending() {
        // No server URL, but validation must fire first.
        let remote = HttpRemote::new(None);
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let entry = Entry::new(date, "", Day::A, "HT");
        let err = remote.upsert(&entry).await.unwrap_err();
        assert!(matches!(err, RemoteError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_rejects_blank_id_before_sending() {
        let remote = HttpRemote::new(None);
        assert_eq!(remote.delete("  ").await.unwrap_err(), RemoteError::MissingId);
    }

    #[test]
    fn test_list_envelope_parses_api_response() {
        let json = r#"{
            "ok": true,
            "data": [{
                "id": "x1",
                "date": "2025-02-03",
                "week": "2",
                "day": "B",
                "exercise": "HT",
                "exerciseLabel": "Hip Thrust",
                "weight": "60",
                "sets": ["10", "10", "10"],
                "rpe": null,
                "notes": null
            }]
        }"#;
        let envelope: ListEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.ok);
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].exercise_label, "Hip Thrust");
        assert_eq!(envelope.data[0].rpe, None);
    }
}
