//! Canonical JSON rendering of a job graph.
//!
//! Layout:
//!
//! ```text
//! { "outputs": [ { "uri", "autolink", "container-profile": { "format",
//!                  "meta-audio-profile": {..}, "meta-video-profile": {..} } } ],
//!   "inputs":  [ { "uri", "autolink", "streams": [ { "stream-id", "media-type",
//!                  "profiles": [ { "format", "output"? } ] } ] } ] }
//! ```
//!
//! Keys keep the order shown; arrays follow creation order.

use serde_json::{json, Map, Value};

use crate::input::Input;
use crate::job::Job;
use crate::output::Output;
use crate::profile::{ContainerProfile, StreamProfile};

impl Job {
    /// Render the job document as a JSON value.
    pub fn to_value(&self) -> Value {
        let outputs: Vec<Value> = self.outputs().map(|(_, output)| output_value(output)).collect();
        let inputs: Vec<Value> = self
            .inputs()
            .map(|(_, input)| input_value(self, input))
            .collect();
        json!({
            "outputs": outputs,
            "inputs": inputs,
        })
    }

    /// Render the job document as a JSON string, two-space indented when
    /// `pretty` is set.
    pub fn to_json(&self, pretty: bool) -> String {
        let value = self.to_value();
        tracing::debug!(job = %self.id(), summary = ?self.summary(), "Serialized job");
        if pretty {
            format!("{value:#}")
        } else {
            value.to_string()
        }
    }
}

fn output_value(output: &Output) -> Value {
    json!({
        "uri": output.uri(),
        "autolink": output.explicitly_added(),
        "container-profile": container_value(output.profile()),
    })
}

fn container_value(profile: &ContainerProfile) -> Value {
    json!({
        "format": profile.format().as_str(),
        "meta-audio-profile": meta_value(profile.meta_audio_profile()),
        "meta-video-profile": meta_value(profile.meta_video_profile()),
    })
}

/// Meta-profiles never link to an output, so only the format is written.
fn meta_value(profile: &StreamProfile) -> Value {
    json!({ "format": profile.format().as_str() })
}

fn input_value(job: &Job, input: &Input) -> Value {
    let streams: Vec<Value> = input
        .streams()
        .map(|(stream_id, profiles)| stream_value(job, stream_id, profiles))
        .collect();
    json!({
        "uri": input.uri(),
        "autolink": input.explicitly_added(),
        "streams": streams,
    })
}

fn stream_value(job: &Job, stream_id: &str, profiles: &[StreamProfile]) -> Value {
    let media_type = profiles
        .first()
        .map(|profile| profile.media_type().as_str())
        .unwrap_or("video");
    let profiles: Vec<Value> = profiles
        .iter()
        .map(|profile| profile_value(job, profile))
        .collect();
    json!({
        "stream-id": stream_id,
        "media-type": media_type,
        "profiles": profiles,
    })
}

fn profile_value(job: &Job, profile: &StreamProfile) -> Value {
    let mut object = Map::new();
    object.insert("format".into(), profile.format().as_str().into());
    if let Some(output) = job.profile_output(profile) {
        object.insert("output".into(), output.uri().into());
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tj_core::FormatId;

    #[test]
    fn empty_job() {
        let job = Job::new();
        assert_eq!(job.to_json(false), r#"{"outputs":[],"inputs":[]}"#);
    }

    #[test]
    fn compact_output_preserves_key_order() {
        let mut job = Job::new();
        job.map_video_stream("in", "v", "out.mkv").unwrap();
        assert_eq!(
            job.to_json(false),
            concat!(
                r#"{"outputs":[{"uri":"out.mkv","autolink":false,"container-profile":"#,
                r#"{"format":"video/x-matroska","meta-audio-profile":{"format":"application/unknown"},"#,
                r#""meta-video-profile":{"format":"application/unknown"}}}],"#,
                r#""inputs":[{"uri":"in","autolink":false,"streams":[{"stream-id":"v","media-type":"video","#,
                r#""profiles":[{"format":"application/unknown","output":"out.mkv"}]}]}]}"#,
            )
        );
    }

    #[test]
    fn pretty_output_uses_two_space_indent() {
        let mut job = Job::new();
        job.add_input("in").unwrap();
        let expected = "{\n  \"outputs\": [],\n  \"inputs\": [\n    {\n      \"uri\": \"in\",\n      \"autolink\": true,\n      \"streams\": []\n    }\n  ]\n}";
        assert_eq!(job.to_json(true), expected);
    }

    #[test]
    fn unlinked_profile_has_no_output_key() {
        let job = Job::new();
        let value = profile_value(&job, &StreamProfile::audio().with_format(FormatId::AAC));
        assert_eq!(value, json!({ "format": "audio/x-aac" }));
    }

    #[test]
    fn to_json_does_not_mutate() {
        let mut job = Job::new();
        job.map_audio_stream("in", "a", "out").unwrap();
        let before = job.summary();
        let first = job.to_json(true);
        let second = job.to_json(true);
        assert_eq!(first, second);
        assert_eq!(job.summary(), before);
    }
}
