//! Unified error type for transjob.
//!
//! Graph conflicts are ordinary values: a rejected `add_*` or `map_*` call
//! leaves the job untouched and hands the caller an [`Error`] describing why.

use std::fmt;

use crate::ids::InputId;
use crate::media::MediaType;

/// Which registry a duplicate URI was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Input,
    Output,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Error type covering every failure mode in transjob.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input or output with this URI is already registered.
    #[error("{entity} already exists: {uri}")]
    DuplicateEntity {
        /// The registry the URI collided in.
        entity: EntityKind,
        /// The URI that was already present.
        uri: String,
    },

    /// The stream id is already bound to profiles of the other media type.
    #[error("stream '{stream_id}' of input {input} is bound to {bound}, cannot map {requested}")]
    MediaTypeConflict {
        /// The input owning the stream id.
        input: InputId,
        /// The contested stream id.
        stream_id: String,
        /// Media type of the profiles already bound to the stream id.
        bound: MediaType,
        /// Media type of the rejected mapping.
        requested: MediaType,
    },

    /// Configuration or constructor arguments failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Convenience constructor for [`Error::DuplicateEntity`].
    pub fn duplicate(entity: EntityKind, uri: impl Into<String>) -> Self {
        Error::DuplicateEntity {
            entity,
            uri: uri.into(),
        }
    }

    /// Convenience constructor for [`Error::MediaTypeConflict`].
    pub fn conflict(
        input: InputId,
        stream_id: impl Into<String>,
        bound: MediaType,
        requested: MediaType,
    ) -> Self {
        Error::MediaTypeConflict {
            input,
            stream_id: stream_id.into(),
            bound,
            requested,
        }
    }

    /// True for the two graph conflicts, which never mutate the job.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Error::DuplicateEntity { .. } | Error::MediaTypeConflict { .. }
        )
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
