use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

// ============================================================================
// Entity Primitives
// ============================================================================

/// Entity identifier.
///
/// A ULID: 128 bits rendered as a fixed 26-character Crockford base-32
/// string, with the millisecond timestamp in the most significant bits.
/// Lexicographic order over the rendered form therefore matches creation
/// order. The Postgres backend relies on this to sort by primary key
/// instead of the `created` column, so any replacement id scheme must keep
/// the property.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(Ulid);

impl EntityId {
    /// Mint a fresh id stamped with the current time.
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Mint an id stamped with an explicit instant. Used to keep the id
    /// timestamp aligned with an entity's `created` field.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(Ulid::from_datetime(SystemTime::from(at)))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EntityId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

/// Generic entity: an identity plus a state value.
///
/// Concrete entities wrap this (composition, no base-class hierarchy) and
/// expose their own read accessors over the state. The state is fixed at
/// construction; there is no mutation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity<S> {
    id: EntityId,
    state: S,
}

impl<S: Clone> Entity<S> {
    pub fn new(id: EntityId, state: S) -> Self {
        Self { id, state }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Independent copy of the state. Mutating the copy never touches the
    /// entity, and the entity hands out nothing that aliases it.
    pub fn internal_state(&self) -> S {
        self.state.clone()
    }
}
