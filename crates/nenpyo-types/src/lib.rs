//! Shared identity and timeline entity types for nenpyo.
//!
//! This crate is the relational foundation: typed IDs, time nodes, events,
//! characters, and scenario metadata. It has **no internal nenpyo
//! dependencies** — a pure leaf crate that other crates build on.
//!
//! # Entity-Relationship Overview
//!
//! ```text
//! Scenario ← one per document
//!     └── owns Character list (insertion order = display order)
//!
//! TimeNode (NodeId) ← a point or period in story time
//!     └── parent_id forms a forest (no cycles)
//!     └── order is unique among siblings of the same parent
//!
//! Event (EventId) ← a narrative beat
//!     └── belongs to exactly one TimeNode (node_id)
//!     └── references a Character by *name*, not id
//!     └── order is unique within the (node_id, attached) partition
//! ```
//!
//! # Key Types
//!
//! |-----------------|------------------------------------------------|
//! | Type            | Purpose                                        |
//! |-----------------|------------------------------------------------|
//! | [`TimeNode`]    | Node in the timeline forest                    |
//! | [`Event`]       | Narrative beat attached to a node              |
//! | [`Character`]   | Named participant with a display color         |
//! | [`Scenario`]    | Document metadata + character roster           |
//! | [`TimeKind`]    | Open string tag (year/date/time/custom/etc/…)  |
//! | [`Placement`]   | Stored side preference (auto/left/right/center)|
//! | [`Side`]        | Resolved visual side (left/right/center)       |
//! |-----------------|------------------------------------------------|

pub mod event;
pub mod ids;
pub mod node;
pub mod scenario;

// Re-export primary types at crate root for convenience.
pub use event::{Event, EventKind, Placement, Side};
pub use ids::{CharacterId, EventId, NodeId};
pub use node::{NodeSize, TimeKind, TimeNode};
pub use scenario::{Character, Scenario, DEFAULT_CHARACTER_COLOR};
