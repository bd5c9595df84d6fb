//! Typed identifiers for job graph entities.
//!
//! Inputs and outputs live in dense registries owned by a job, so their ids
//! are plain indices. A job itself is tagged with a random UUID so log lines
//! from concurrent jobs can be told apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Generate a newtype index wrapper addressing a slot in a job registry.
///
/// The macro produces a struct with:
/// - `from_index()` / `index()` conversions
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`, `Serialize`, `Deserialize`
/// - `Display` rendering as `#<index>`
macro_rules! index_id {
    ($($(#[doc = $doc:expr])* $name:ident),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(usize);

            impl $name {
                /// Wrap a registry index.
                #[must_use]
                pub const fn from_index(index: usize) -> Self {
                    Self(index)
                }

                /// Return the registry index.
                #[must_use]
                pub const fn index(self) -> usize {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "#{}", self.0)
                }
            }
        )+
    };
}

index_id! {
    /// Identifier of an input within its job.
    InputId,
    /// Identifier of an output within its job.
    OutputId,
}

/// Unique identifier for a job instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Create a new random ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
