//! Job inputs and their stream bindings.

use indexmap::IndexMap;
use tj_core::MediaType;

use crate::profile::StreamProfile;

/// A source URI and the profiles mapped onto each of its streams.
#[derive(Debug, Clone)]
pub struct Input {
    uri: String,
    explicitly_added: bool,
    /// Stream id to profiles, in mapping order. All profiles under one
    /// stream id share a media type.
    streams: IndexMap<String, Vec<StreamProfile>>,
}

impl Input {
    pub(crate) fn new(uri: &str, explicitly_added: bool) -> Self {
        Self {
            uri: uri.to_owned(),
            explicitly_added,
            streams: IndexMap::new(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// True when registered through `add_input` rather than created while
    /// mapping a stream.
    pub fn explicitly_added(&self) -> bool {
        self.explicitly_added
    }

    /// Stream ids and their profiles in mapping order.
    pub fn streams(&self) -> impl Iterator<Item = (&str, &[StreamProfile])> {
        self.streams
            .iter()
            .map(|(id, profiles)| (id.as_str(), profiles.as_slice()))
    }

    pub fn stream(&self, stream_id: &str) -> Option<&[StreamProfile]> {
        self.streams.get(stream_id).map(Vec::as_slice)
    }

    /// Media type the stream id is bound to, if any profile targets it.
    pub fn stream_media_type(&self, stream_id: &str) -> Option<MediaType> {
        self.stream(stream_id)
            .and_then(|profiles| profiles.first())
            .map(StreamProfile::media_type)
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    pub fn profile_count(&self) -> usize {
        self.streams.values().map(Vec::len).sum()
    }

    pub(crate) fn stream_profile_mut(
        &mut self,
        stream_id: &str,
        index: usize,
    ) -> Option<&mut StreamProfile> {
        self.streams.get_mut(stream_id)?.get_mut(index)
    }

    /// Append `profile` under `stream_id`, returning its position.
    ///
    /// Fails with the media type the stream id is already bound to when any
    /// existing profile disagrees with `profile`; nothing is inserted then.
    pub(crate) fn bind(
        &mut self,
        stream_id: &str,
        profile: StreamProfile,
    ) -> std::result::Result<usize, MediaType> {
        let Some(profiles) = self.streams.get_mut(stream_id) else {
            self.streams.insert(stream_id.to_owned(), vec![profile]);
            return Ok(0);
        };

        let requested = profile.media_type();
        if let Some(bound) = profiles
            .iter()
            .map(StreamProfile::media_type)
            .find(|bound| *bound != requested)
        {
            return Err(bound);
        }

        profiles.push(profile);
        Ok(profiles.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_input_is_empty() {
        let input = Input::new("file:///foo/bar", false);
        assert_eq!(input.uri(), "file:///foo/bar");
        assert!(!input.explicitly_added());
        assert_eq!(input.stream_count(), 0);
        assert_eq!(input.stream("anything"), None);
    }

    #[test]
    fn bind_appends_same_media_type() {
        let mut input = Input::new("file:///foo/bar", true);
        assert_eq!(input.bind("v", StreamProfile::video()), Ok(0));
        assert_eq!(input.bind("v", StreamProfile::video()), Ok(1));
        assert_eq!(input.stream("v").map(<[_]>::len), Some(2));
        assert_eq!(input.stream_media_type("v"), Some(MediaType::Video));
    }

    #[test]
    fn bind_rejects_other_media_type() {
        let mut input = Input::new("file:///foo/bar", true);
        input.bind("s", StreamProfile::video()).unwrap();
        assert_eq!(input.bind("s", StreamProfile::audio()), Err(MediaType::Video));
        assert_eq!(input.stream("s").map(<[_]>::len), Some(1));
    }

    #[test]
    fn streams_keep_mapping_order() {
        let mut input = Input::new("file:///foo/bar", false);
        input.bind("video-stream-id", StreamProfile::video()).unwrap();
        input.bind("audio-stream-id", StreamProfile::audio()).unwrap();
        input.bind("video-stream-id", StreamProfile::video()).unwrap();

        let ids: Vec<&str> = input.streams().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["video-stream-id", "audio-stream-id"]);
        assert_eq!(input.profile_count(), 3);
    }
}
