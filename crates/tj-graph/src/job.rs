//! The [`Job`] owns the whole graph and resolves stream mappings.
//!
//! Inputs and outputs are created either explicitly (`add_input`,
//! `add_output`) or lazily as a side effect of mapping a stream. Either way a
//! URI names at most one entity per registry. Mapped stream profiles start
//! from the meta-profile of their output's container.

use std::fmt;

use indexmap::IndexMap;
use tj_core::{
    EntityKind, Error, FormatId, GraphConfig, InputId, JobId, MediaType, OutputId, Result,
};

use crate::input::Input;
use crate::output::Output;
use crate::policy::{CodecAttributeCopier, ExtensionGuesser, FormatGuesser, NoopCopier};
use crate::profile::{ContainerProfile, StreamProfile};

/// Handle to a profile created by a stream mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamRef {
    input: InputId,
    stream_id: String,
    index: usize,
}

impl StreamRef {
    pub fn input(&self) -> InputId {
        self.input
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    /// Position of the profile among those bound to the stream id.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Entity counts of a job graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobSummary {
    pub inputs: usize,
    pub outputs: usize,
    pub streams: usize,
    pub profiles: usize,
}

/// A transcoding job graph.
pub struct Job {
    id: JobId,
    inputs: IndexMap<String, Input>,
    outputs: IndexMap<String, Output>,
    guesser: Box<dyn FormatGuesser>,
    copier: Box<dyn CodecAttributeCopier>,
}

impl Job {
    /// An empty job using the extension guesser and no codec copier.
    pub fn new() -> Self {
        Self {
            id: JobId::new(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
            guesser: Box::new(ExtensionGuesser::default()),
            copier: Box::new(NoopCopier),
        }
    }

    /// An empty job whose format guessing follows `config`.
    pub fn from_config(config: &GraphConfig) -> Self {
        for warning in config.validate() {
            tracing::warn!("graph config: {warning}");
        }
        config.register_formats();
        Self::new().with_guesser(ExtensionGuesser::from_config(&config.formats))
    }

    /// Replace the policy deriving container formats from output URIs.
    #[must_use]
    pub fn with_guesser(mut self, guesser: impl FormatGuesser + 'static) -> Self {
        self.guesser = Box::new(guesser);
        self
    }

    /// Replace the policy copying codec attributes onto mapped profiles.
    #[must_use]
    pub fn with_codec_copier(mut self, copier: impl CodecAttributeCopier + 'static) -> Self {
        self.copier = Box::new(copier);
        self
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    /// Return the input for `uri`, creating an implicit one if needed.
    pub fn get_or_create_input(&mut self, uri: &str) -> InputId {
        match self.inputs.get_index_of(uri) {
            Some(index) => InputId::from_index(index),
            None => self.create_input(uri, false),
        }
    }

    /// Register an input explicitly. Fails if `uri` is already present,
    /// however it was created.
    pub fn add_input(&mut self, uri: &str) -> Result<InputId> {
        if self.inputs.contains_key(uri) {
            tracing::warn!(job = %self.id, uri, "Refusing to add duplicate input");
            return Err(Error::duplicate(EntityKind::Input, uri));
        }
        Ok(self.create_input(uri, true))
    }

    fn create_input(&mut self, uri: &str, explicitly_added: bool) -> InputId {
        let (index, _) = self
            .inputs
            .insert_full(uri.to_owned(), Input::new(uri, explicitly_added));
        tracing::debug!(job = %self.id, uri, explicitly_added, "Created input");
        InputId::from_index(index)
    }

    pub fn input(&self, id: InputId) -> Option<&Input> {
        self.inputs.get_index(id.index()).map(|(_, input)| input)
    }

    pub fn input_id(&self, uri: &str) -> Option<InputId> {
        self.inputs.get_index_of(uri).map(InputId::from_index)
    }

    pub fn input_by_uri(&self, uri: &str) -> Option<&Input> {
        self.inputs.get(uri)
    }

    /// Inputs in creation order.
    pub fn inputs(&self) -> impl Iterator<Item = (InputId, &Input)> {
        self.inputs
            .values()
            .enumerate()
            .map(|(index, input)| (InputId::from_index(index), input))
    }

    // -----------------------------------------------------------------------
    // Outputs
    // -----------------------------------------------------------------------

    /// Return the output for `uri`, creating an implicit one if needed.
    ///
    /// A new output takes `profile` as its container profile, or one derived
    /// from the URI when `None`. If the output already exists, `profile` is
    /// dropped and the existing output is returned unchanged.
    pub fn get_or_create_output(
        &mut self,
        uri: &str,
        profile: Option<ContainerProfile>,
    ) -> OutputId {
        match self.outputs.get_index_of(uri) {
            Some(index) => OutputId::from_index(index),
            None => self.create_output(uri, profile, false),
        }
    }

    /// Register an output explicitly. Fails if `uri` is already present,
    /// however it was created.
    pub fn add_output(&mut self, uri: &str, profile: Option<ContainerProfile>) -> Result<OutputId> {
        if self.outputs.contains_key(uri) {
            tracing::warn!(job = %self.id, uri, "Refusing to add duplicate output");
            return Err(Error::duplicate(EntityKind::Output, uri));
        }
        Ok(self.create_output(uri, profile, true))
    }

    fn create_output(
        &mut self,
        uri: &str,
        profile: Option<ContainerProfile>,
        explicitly_added: bool,
    ) -> OutputId {
        let profile = profile.unwrap_or_else(|| self.guess_container_profile(uri));
        let format = profile.format();
        let (index, _) = self
            .outputs
            .insert_full(uri.to_owned(), Output::new(uri, explicitly_added, profile));
        tracing::debug!(job = %self.id, uri, explicitly_added, %format, "Created output");
        OutputId::from_index(index)
    }

    fn guess_container_profile(&self, uri: &str) -> ContainerProfile {
        ContainerProfile::new().with_format(self.guesser.guess(uri))
    }

    pub fn output(&self, id: OutputId) -> Option<&Output> {
        self.outputs.get_index(id.index()).map(|(_, output)| output)
    }

    pub fn output_id(&self, uri: &str) -> Option<OutputId> {
        self.outputs.get_index_of(uri).map(OutputId::from_index)
    }

    pub fn output_by_uri(&self, uri: &str) -> Option<&Output> {
        self.outputs.get(uri)
    }

    /// Mutable access to an output's container profile.
    ///
    /// Profiles already mapped onto the output keep the formats they
    /// inherited; only later mappings see the change.
    pub fn output_profile_mut(&mut self, id: OutputId) -> Option<&mut ContainerProfile> {
        self.outputs
            .get_index_mut(id.index())
            .map(|(_, output)| output.profile_mut())
    }

    /// Outputs in creation order.
    pub fn outputs(&self) -> impl Iterator<Item = (OutputId, &Output)> {
        self.outputs
            .values()
            .enumerate()
            .map(|(index, output)| (OutputId::from_index(index), output))
    }

    // -----------------------------------------------------------------------
    // Stream mapping
    // -----------------------------------------------------------------------

    /// Map a video stream of `input_uri` onto `output_uri`.
    pub fn map_video_stream(
        &mut self,
        input_uri: &str,
        stream_id: &str,
        output_uri: &str,
    ) -> Result<StreamRef> {
        self.map_stream(input_uri, stream_id, MediaType::Video, output_uri)
    }

    /// Map an audio stream of `input_uri` onto `output_uri`.
    pub fn map_audio_stream(
        &mut self,
        input_uri: &str,
        stream_id: &str,
        output_uri: &str,
    ) -> Result<StreamRef> {
        self.map_stream(input_uri, stream_id, MediaType::Audio, output_uri)
    }

    /// Create a profile encoding `stream_id` of `input_uri` into `output_uri`.
    ///
    /// Missing inputs and outputs are created implicitly; an implicit output
    /// gets a guessed container profile. The new profile inherits the format
    /// of the container's meta-profile for `media_type`. A stream id may
    /// carry several profiles, but only of one media type: mapping the other
    /// type fails with [`Error::MediaTypeConflict`] and leaves the existing
    /// profiles as they were.
    pub fn map_stream(
        &mut self,
        input_uri: &str,
        stream_id: &str,
        media_type: MediaType,
        output_uri: &str,
    ) -> Result<StreamRef> {
        let input_id = self.get_or_create_input(input_uri);
        let output_id = self.get_or_create_output(output_uri, None);

        let meta = self.outputs[output_id.index()]
            .profile()
            .meta_profile(media_type);
        let mut profile = StreamProfile::new(media_type)
            .linked(input_id, output_id)
            .with_format(meta.format());
        self.copier.copy_attributes(meta, &mut profile);
        let format = profile.format();

        let input = &mut self.inputs[input_id.index()];
        match input.bind(stream_id, profile) {
            Ok(index) => {
                tracing::debug!(
                    job = %self.id,
                    input = input_uri,
                    output = output_uri,
                    stream_id,
                    %media_type,
                    %format,
                    "Mapped stream"
                );
                Ok(StreamRef {
                    input: input_id,
                    stream_id: stream_id.to_owned(),
                    index,
                })
            }
            Err(bound) => {
                tracing::warn!(
                    job = %self.id,
                    input = input_uri,
                    stream_id,
                    %bound,
                    requested = %media_type,
                    "Stream id already bound to another media type"
                );
                Err(Error::conflict(input_id, stream_id, bound, media_type))
            }
        }
    }

    pub fn stream_profile(&self, stream: &StreamRef) -> Option<&StreamProfile> {
        self.input(stream.input)?
            .stream(&stream.stream_id)?
            .get(stream.index)
    }

    /// Change the format of a mapped profile. Its media type and links stay
    /// as they were. `None` if `stream` does not resolve.
    pub fn set_stream_format(&mut self, stream: &StreamRef, format: FormatId) -> Option<()> {
        let profile = self
            .inputs
            .get_index_mut(stream.input.index())?
            .1
            .stream_profile_mut(&stream.stream_id, stream.index)?;
        profile.set_format(format);
        tracing::debug!(job = %self.id, stream_id = %stream.stream_id, %format, "Set stream format");
        Some(())
    }

    /// The input a mapped profile belongs to; `None` for meta-profiles.
    pub fn profile_input(&self, profile: &StreamProfile) -> Option<&Input> {
        self.input(profile.input()?)
    }

    /// The output a mapped profile targets; `None` for meta-profiles.
    pub fn profile_output(&self, profile: &StreamProfile) -> Option<&Output> {
        self.output(profile.output()?)
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    pub fn summary(&self) -> JobSummary {
        self.inputs.values().fold(
            JobSummary {
                inputs: self.inputs.len(),
                outputs: self.outputs.len(),
                ..JobSummary::default()
            },
            |mut summary, input| {
                summary.streams += input.stream_count();
                summary.profiles += input.profile_count();
                summary
            },
        )
    }

    /// Container formats in use, for pipeline builders that need to check
    /// muxer availability up front.
    pub fn container_formats(&self) -> Vec<FormatId> {
        let mut formats: Vec<FormatId> = Vec::new();
        for output in self.outputs.values() {
            let format = output.profile().format();
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .finish_non_exhaustive()
    }
}
