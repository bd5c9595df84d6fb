//! tj-core: shared types for transjob.
//!
//! Interned format identifiers, typed ids, the media-type tag, the unified
//! error type and graph configuration. Everything a job graph is built from
//! that does not itself depend on the graph.

pub mod config;
pub mod error;
pub mod format;
pub mod ids;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use config::GraphConfig;
pub use error::{EntityKind, Error, Result};
pub use format::FormatId;
pub use ids::*;
pub use media::MediaType;
