//! Stream and container profiles.
//!
//! A [`StreamProfile`] describes how one stream of an input is encoded for
//! one output. A [`ContainerProfile`] describes an output's container and
//! carries a pair of meta-profiles that mapped streams inherit from.

use tj_core::{Error, FormatId, InputId, MediaType, OutputId, Result};

/// Fields shared by both stream profile variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileCore {
    format: FormatId,
    input: Option<InputId>,
    output: Option<OutputId>,
}

/// Per-stream encoding profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamProfile {
    Video(ProfileCore),
    Audio(ProfileCore),
}

impl StreamProfile {
    /// A passthrough profile of the given media type with no links.
    pub fn new(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Video => Self::Video(ProfileCore::default()),
            MediaType::Audio => Self::Audio(ProfileCore::default()),
        }
    }

    /// A passthrough video profile.
    pub fn video() -> Self {
        Self::new(MediaType::Video)
    }

    /// A passthrough audio profile.
    pub fn audio() -> Self {
        Self::new(MediaType::Audio)
    }

    /// Builder-style format setter.
    #[must_use]
    pub fn with_format(mut self, format: FormatId) -> Self {
        self.set_format(format);
        self
    }

    pub(crate) fn linked(mut self, input: InputId, output: OutputId) -> Self {
        let core = self.core_mut();
        core.input = Some(input);
        core.output = Some(output);
        self
    }

    pub(crate) fn unlinked(mut self) -> Self {
        let core = self.core_mut();
        core.input = None;
        core.output = None;
        self
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            Self::Video(_) => MediaType::Video,
            Self::Audio(_) => MediaType::Audio,
        }
    }

    pub fn format(&self) -> FormatId {
        self.core().format
    }

    pub fn set_format(&mut self, format: FormatId) {
        self.core_mut().format = format;
    }

    /// The input this profile was resolved against; `None` for meta-profiles.
    /// Resolve through [`Job::input`](crate::Job::input).
    pub fn input(&self) -> Option<InputId> {
        self.core().input
    }

    /// The output this profile was resolved against; `None` for meta-profiles.
    pub fn output(&self) -> Option<OutputId> {
        self.core().output
    }

    fn core(&self) -> &ProfileCore {
        match self {
            Self::Video(core) | Self::Audio(core) => core,
        }
    }

    fn core_mut(&mut self) -> &mut ProfileCore {
        match self {
            Self::Video(core) | Self::Audio(core) => core,
        }
    }
}

/// Container format plus the meta-profiles streams muxed into it start from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerProfile {
    format: FormatId,
    meta_video_profile: StreamProfile,
    meta_audio_profile: StreamProfile,
}

impl ContainerProfile {
    /// A passthrough container with passthrough meta-profiles.
    pub fn new() -> Self {
        Self {
            format: FormatId::NONE,
            meta_video_profile: StreamProfile::video(),
            meta_audio_profile: StreamProfile::audio(),
        }
    }

    /// Build a container from caller-supplied meta-profiles.
    ///
    /// Omitted meta-profiles are created as passthrough. Supplied ones must
    /// match their slot's media type; their input/output links are cleared.
    pub fn try_new(
        meta_audio: Option<StreamProfile>,
        meta_video: Option<StreamProfile>,
    ) -> Result<Self> {
        let meta_audio_profile = meta_slot(meta_audio, MediaType::Audio)?;
        let meta_video_profile = meta_slot(meta_video, MediaType::Video)?;
        Ok(Self {
            format: FormatId::NONE,
            meta_video_profile,
            meta_audio_profile,
        })
    }

    /// Builder-style format setter.
    #[must_use]
    pub fn with_format(mut self, format: FormatId) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> FormatId {
        self.format
    }

    pub fn set_format(&mut self, format: FormatId) {
        self.format = format;
    }

    pub fn meta_video_profile(&self) -> &StreamProfile {
        &self.meta_video_profile
    }

    pub fn meta_audio_profile(&self) -> &StreamProfile {
        &self.meta_audio_profile
    }

    /// The meta-profile a mapped stream of `media_type` inherits from.
    pub fn meta_profile(&self, media_type: MediaType) -> &StreamProfile {
        match media_type {
            MediaType::Video => &self.meta_video_profile,
            MediaType::Audio => &self.meta_audio_profile,
        }
    }

    /// Change the format of one meta-profile in place.
    pub fn set_meta_format(&mut self, media_type: MediaType, format: FormatId) {
        match media_type {
            MediaType::Video => self.meta_video_profile.set_format(format),
            MediaType::Audio => self.meta_audio_profile.set_format(format),
        }
    }
}

impl Default for ContainerProfile {
    fn default() -> Self {
        Self::new()
    }
}

fn meta_slot(profile: Option<StreamProfile>, slot: MediaType) -> Result<StreamProfile> {
    match profile {
        None => Ok(StreamProfile::new(slot)),
        Some(profile) if profile.media_type() == slot => Ok(profile.unlinked()),
        Some(profile) => Err(Error::Validation(format!(
            "meta {slot} profile slot given a {} profile",
            profile.media_type()
        ))),
    }
}
