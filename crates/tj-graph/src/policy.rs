//! Pluggable policies a job consults while resolving profiles.
//!
//! - [`FormatGuesser`] picks a container format for outputs created without
//!   an explicit [`ContainerProfile`](crate::ContainerProfile).
//! - [`CodecAttributeCopier`] transfers codec-specific settings from a
//!   container's meta-profile onto a freshly mapped stream profile.

use std::collections::HashMap;

use tj_core::config::FormatsConfig;
use tj_core::FormatId;

use crate::profile::StreamProfile;

/// Guess a container format from an output URI.
pub trait FormatGuesser: Send + Sync {
    fn guess(&self, uri: &str) -> FormatId;
}

impl<F> FormatGuesser for F
where
    F: Fn(&str) -> FormatId + Send + Sync,
{
    fn guess(&self, uri: &str) -> FormatId {
        self(uri)
    }
}

/// Copy codec-specific attributes between stream profiles of one media type.
///
/// The job copies the format itself before calling this.
pub trait CodecAttributeCopier: Send + Sync {
    fn copy_attributes(&self, from: &StreamProfile, to: &mut StreamProfile);
}

/// Copier used when no codec property module is plugged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCopier;

impl CodecAttributeCopier for NoopCopier {
    fn copy_attributes(&self, _from: &StreamProfile, _to: &mut StreamProfile) {}
}

/// Guess by file extension, falling back to passthrough.
#[derive(Debug, Clone)]
pub struct ExtensionGuesser {
    /// Lowercase extension without the dot.
    table: HashMap<String, FormatId>,
}

impl ExtensionGuesser {
    /// A guesser that recognizes nothing.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Build the table from configuration, interning every named format.
    pub fn from_config(config: &FormatsConfig) -> Self {
        config
            .extensions
            .iter()
            .fold(Self::empty(), |guesser, (ext, format)| {
                guesser.with_extension(ext, FormatId::intern(format))
            })
    }

    /// Register (or replace) an extension.
    #[must_use]
    pub fn with_extension(mut self, ext: &str, format: FormatId) -> Self {
        let ext = ext.trim_start_matches('.').to_lowercase();
        self.table.insert(ext, format);
        self
    }
}

impl Default for ExtensionGuesser {
    fn default() -> Self {
        Self::empty().with_extension("mkv", FormatId::MATROSKA)
    }
}

impl FormatGuesser for ExtensionGuesser {
    fn guess(&self, uri: &str) -> FormatId {
        uri_extension(uri)
            .and_then(|ext| self.table.get(&ext).copied())
            .unwrap_or(FormatId::NONE)
    }
}

/// Lowercased extension of the last path segment of `uri`, ignoring any
/// query string or fragment.
///
/// This is not a plain suffix match on the URI: `file:///dir/.mkv` has no
/// extension, `.MKV` matches `mkv`, and `out.mkv?x=1` still yields `mkv`.
fn uri_extension(uri: &str) -> Option<String> {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let segment = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}
