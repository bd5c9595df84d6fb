//! Shared helpers for integration tests.

#![allow(dead_code)]

use transjob::{ContainerProfile, FormatId, Job, StreamProfile};

pub const INPUT: &str = "file:///foo/bar";
pub const MKV_OUTPUT: &str = "file:///foo/baz.mkv";

/// Matroska container whose streams default to H.264 video and AAC audio.
pub fn h264_aac_matroska() -> ContainerProfile {
    ContainerProfile::try_new(
        Some(StreamProfile::audio().with_format(FormatId::AAC)),
        Some(StreamProfile::video().with_format(FormatId::H264)),
    )
    .expect("meta profiles are in the right slots")
    .with_format(FormatId::MATROSKA)
}

/// Assert the job renders exactly `expected`, including key order.
pub fn assert_document(job: &Job, expected: &str) {
    let expected: serde_json::Value = serde_json::from_str(expected).expect("expected JSON parses");
    let actual: serde_json::Value =
        serde_json::from_str(&job.to_json(true)).expect("job JSON parses");
    assert_eq!(actual, expected);
    // Values compare maps regardless of order; the compact rendering does not.
    assert_eq!(job.to_json(false), expected.to_string());
}
