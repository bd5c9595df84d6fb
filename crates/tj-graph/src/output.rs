//! Job outputs.

use crate::profile::ContainerProfile;

/// A destination URI and the container profile it is written with.
#[derive(Debug, Clone)]
pub struct Output {
    uri: String,
    explicitly_added: bool,
    profile: ContainerProfile,
}

impl Output {
    pub(crate) fn new(uri: &str, explicitly_added: bool, profile: ContainerProfile) -> Self {
        Self {
            uri: uri.to_owned(),
            explicitly_added,
            profile,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// True when registered through `add_output` rather than created while
    /// mapping a stream.
    pub fn explicitly_added(&self) -> bool {
        self.explicitly_added
    }

    pub fn profile(&self) -> &ContainerProfile {
        &self.profile
    }

    pub(crate) fn profile_mut(&mut self) -> &mut ContainerProfile {
        &mut self.profile
    }
}
