//! Change-feed event types.
//!
//! The document store pushes one `ChangeEvent` per document mutation:
//! - `EventId` - Unique identifier for events (deduplication)
//! - `Collection` - Which collection the document lives in
//! - `ChangeKind` - `create | update | delete`
//! - `ChangeEvent` - Transport wrapper carrying all of the above

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Timestamp, ValidationError};

/// Unique identifier for events (used for deduplication).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new random EventId using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates an EventId from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Document collections observed through the change feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Habits,
    Completions,
}

impl Collection {
    /// Returns all collections.
    pub fn all() -> &'static [Collection] {
        &[Collection::Habits, Collection::Completions]
    }

    /// Returns the collection name used in logs and channel names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Habits => "habits",
            Collection::Completions => "completions",
        }
    }

    /// Change-feed channel for this collection's documents.
    pub fn channel(&self, database_id: &str) -> String {
        format!(
            "databases.{}.collections.{}.documents",
            database_id,
            self.as_str()
        )
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of document mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Create => "create",
            ChangeKind::Update => "update",
            ChangeKind::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = ValidationError;

    /// Parses either a bare kind (`create`) or a full event name ending in
    /// the kind (`databases.*.collections.*.documents.*.create`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = s.rsplit('.').next().unwrap_or(s);
        match kind {
            "create" => Ok(ChangeKind::Create),
            "update" => Ok(ChangeKind::Update),
            "delete" => Ok(ChangeKind::Delete),
            other => Err(ValidationError::not_in_set(
                "change_kind",
                &["create", "update", "delete"],
                other,
            )),
        }
    }
}

/// One document mutation delivered by the change feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Unique ID for this event instance.
    pub event_id: EventId,

    /// Collection the mutated document belongs to.
    pub collection: Collection,

    /// Mutation kind.
    pub kind: ChangeKind,

    /// Store id of the mutated document.
    pub document_id: String,

    /// When the mutation happened.
    pub occurred_at: Timestamp,
}

impl ChangeEvent {
    /// Creates a new change event stamped with the current time.
    pub fn new(collection: Collection, kind: ChangeKind, document_id: impl Into<String>) -> Self {
        Self {
            event_id: EventId::new(),
            collection,
            kind,
            document_id: document_id.into(),
            occurred_at: Timestamp::now(),
        }
    }

    /// Overrides the occurrence time.
    pub fn at(mut self, occurred_at: Timestamp) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_generates_unique_values() {
        assert_ne!(EventId::new(), EventId::new());
    }

    #[test]
    fn event_id_from_string_preserves_value() {
        let id = EventId::from_string("test-id-123");
        assert_eq!(id.as_str(), "test-id-123");
    }

    #[test]
    fn channel_names_follow_document_path() {
        assert_eq!(
            Collection::Habits.channel("main"),
            "databases.main.collections.habits.documents"
        );
    }

    #[test]
    fn change_kind_parses_bare_names() {
        assert_eq!("create".parse::<ChangeKind>().unwrap(), ChangeKind::Create);
        assert_eq!("update".parse::<ChangeKind>().unwrap(), ChangeKind::Update);
        assert_eq!("delete".parse::<ChangeKind>().unwrap(), ChangeKind::Delete);
    }

    #[test]
    fn change_kind_parses_qualified_event_names() {
        let kind: ChangeKind = "databases.*.collections.*.documents.*.delete"
            .parse()
            .unwrap();
        assert_eq!(kind, ChangeKind::Delete);
    }

    #[test]
    fn change_kind_rejects_unknown() {
        assert!("databases.*.collections.*.documents.*.upsert"
            .parse::<ChangeKind>()
            .is_err());
    }

    #[test]
    fn change_event_serializes_with_lowercase_tags() {
        let event = ChangeEvent::new(Collection::Completions, ChangeKind::Create, "doc-1");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["collection"], "completions");
        assert_eq!(json["kind"], "create");
        assert_eq!(json["document_id"], "doc-1");
    }
}
