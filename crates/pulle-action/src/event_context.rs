use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `EventKind` values.
pub enum EventKind {
    PullRequest,
    Issues,
}

impl EventKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "pull_request" => Some(Self::PullRequest),
            "issues" => Some(Self::Issues),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PullRequest => "pull_request",
            Self::Issues => "issues",
        }
    }

    /// Key of the payload substructure carrying the triggering item.
    ///
    /// The `issues` webhook nests its item under `issue`, not `issues`.
    pub fn payload_key(&self) -> &'static str {
        match self {
            Self::PullRequest => "pull_request",
            Self::Issues => "issue",
        }
    }
}

#[derive(Debug, Clone)]
/// Title, body, and number of the triggering pull request or issue.
pub struct EventContext {
    pub kind: EventKind,
    pub issue_number: u64,
    pub title: String,
    pub body: String,
}

pub fn extract_event_context(kind: EventKind, payload: &Value) -> Result<EventContext> {
    let key = kind.payload_key();
    let Some(item) = payload.get(key) else {
        bail!("event payload is missing the '{key}' object");
    };

    let Some(issue_number) = item.get("number").and_then(Value::as_u64) else {
        bail!("unable to resolve the issue number from the event payload");
    };
    let title = item
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if title.is_empty() {
        bail!("unable to resolve the title from the event payload");
    }
    let body = item
        .get("body")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(EventContext {
        kind,
        issue_number,
        title: title.to_string(),
        body,
    })
}

pub fn load_event_context(path: &Path, kind: EventKind) -> Result<EventContext> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event payload {}", path.display()))?;
    let payload: Value = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse event payload {}", path.display()))?;
    extract_event_context(kind, &payload)
}
