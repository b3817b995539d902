//! Error types for store and codec operations.
//!
//! Two taxonomies: [`ModelError`] for blocking user-input errors (each
//! variant identifies the offending field), [`CodecError`] for import
//! rejection. Invalid drag gestures are *not* errors — the reordering
//! engine treats them as silent no-ops.

use thiserror::Error;

use nenpyo_types::{CharacterId, EventId, NodeId};

/// Errors that block a save operation. The edit-form state stays untouched;
/// the message names the field that needs fixing.
#[derive(Error, Debug)]
pub enum ModelError {
    /// No time slot selected for an event.
    #[error("no time slot selected")]
    MissingTimeNode,

    /// Event title is empty.
    #[error("event title must not be empty")]
    EmptyTitle,

    /// Non-clock time node with an empty value.
    #[error("time value must not be empty")]
    EmptyTimeValue,

    /// Clock-type time node with an empty hour field.
    #[error("hour must not be empty for a clock time")]
    EmptyHour,

    /// Character with an empty name.
    #[error("character name must not be empty")]
    EmptyCharacterName,

    /// Referenced time node does not exist.
    #[error("time node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Referenced event does not exist.
    #[error("event not found: {0:?}")]
    EventNotFound(EventId),

    /// Referenced character does not exist.
    #[error("character not found: {0:?}")]
    CharacterNotFound(CharacterId),

    /// Edit would make a node its own ancestor.
    #[error("parent selection would create a cycle under node {0:?}")]
    CyclicParent(NodeId),
}

/// Errors that abort a document import, leaving the current in-memory
/// document untouched.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Payload is not valid JSON, or a section has the wrong shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level payload is not a JSON object.
    #[error("document is not a JSON object")]
    NotAnObject,

    /// `scenario` section is missing.
    #[error("document has no scenario section")]
    MissingScenario,

    /// `timeNodes` is missing or not an array.
    #[error("document has no timeNodes array")]
    MissingTimeNodes,

    /// `events` is missing or not an array.
    #[error("document has no events array")]
    MissingEvents,
}
