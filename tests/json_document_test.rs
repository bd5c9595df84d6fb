//! Job document integration tests.
//!
//! Builds the three reference graphs (manual, automatic and hybrid mapping)
//! and checks the rendered document field by field and key by key.

mod common;

use common::{assert_document, h264_aac_matroska, INPUT, MKV_OUTPUT};
use transjob::{FormatId, GraphConfig, Job};

#[test]
fn manual_mapping_document() {
    let mut job = Job::new();
    job.map_video_stream(INPUT, "stream-id", MKV_OUTPUT).unwrap();
    job.map_video_stream(INPUT, "stream-id", MKV_OUTPUT).unwrap();
    // Rejected; must not show up in the document.
    assert!(job.map_audio_stream(INPUT, "stream-id", MKV_OUTPUT).is_err());

    assert_document(
        &job,
        r#"{
          "outputs": [
            {
              "uri": "file:///foo/baz.mkv",
              "autolink": false,
              "container-profile": {
                "format": "video/x-matroska",
                "meta-audio-profile": { "format": "application/unknown" },
                "meta-video-profile": { "format": "application/unknown" }
              }
            }
          ],
          "inputs": [
            {
              "uri": "file:///foo/bar",
              "autolink": false,
              "streams": [
                {
                  "stream-id": "stream-id",
                  "media-type": "video",
                  "profiles": [
                    { "format": "application/unknown", "output": "file:///foo/baz.mkv" },
                    { "format": "application/unknown", "output": "file:///foo/baz.mkv" }
                  ]
                }
              ]
            }
          ]
        }"#,
    );
}

#[test]
fn automatic_mapping_document() {
    let mut job = Job::new();
    job.add_input(INPUT).unwrap();
    let mkv = job.add_output(MKV_OUTPUT, None).unwrap();
    job.output_profile_mut(mkv)
        .unwrap()
        .set_format(FormatId::NONE);
    job.add_output("file://foo/baz.mp4", Some(h264_aac_matroska()))
        .unwrap();

    assert_document(
        &job,
        r#"{
          "outputs": [
            {
              "uri": "file:///foo/baz.mkv",
              "autolink": true,
              "container-profile": {
                "format": "application/unknown",
                "meta-audio-profile": { "format": "application/unknown" },
                "meta-video-profile": { "format": "application/unknown" }
              }
            },
            {
              "uri": "file://foo/baz.mp4",
              "autolink": true,
              "container-profile": {
                "format": "video/x-matroska",
                "meta-audio-profile": { "format": "audio/x-aac" },
                "meta-video-profile": { "format": "video/x-h264" }
              }
            }
          ],
          "inputs": [
            { "uri": "file:///foo/bar", "autolink": true, "streams": [] }
          ]
        }"#,
    );
}

#[test]
fn hybrid_mapping_document() {
    let mut job = Job::new();
    job.add_input(INPUT).unwrap();
    job.add_output("file://foo/baz.mkv", Some(h264_aac_matroska()))
        .unwrap();
    job.map_audio_stream(INPUT, "audio-stream-id", "file://foo/baz.mkv")
        .unwrap();
    job.map_video_stream(INPUT, "video-stream-id", "file://foo/baz.mkv")
        .unwrap();

    assert_document(
        &job,
        r#"{
          "outputs": [
            {
              "uri": "file://foo/baz.mkv",
              "autolink": true,
              "container-profile": {
                "format": "video/x-matroska",
                "meta-audio-profile": { "format": "audio/x-aac" },
                "meta-video-profile": { "format": "video/x-h264" }
              }
            }
          ],
          "inputs": [
            {
              "uri": "file:///foo/bar",
              "autolink": true,
              "streams": [
                {
                  "stream-id": "audio-stream-id",
                  "media-type": "audio",
                  "profiles": [ { "format": "audio/x-aac", "output": "file://foo/baz.mkv" } ]
                },
                {
                  "stream-id": "video-stream-id",
                  "media-type": "video",
                  "profiles": [ { "format": "video/x-h264", "output": "file://foo/baz.mkv" } ]
                }
              ]
            }
          ]
        }"#,
    );
}

#[test]
fn explicit_profile_through_get_or_create_is_not_autolinked() {
    let mut job = Job::new();
    job.get_or_create_output("file:///out.mkv", Some(h264_aac_matroska()));
    let value = job.to_value();
    assert_eq!(value["outputs"][0]["autolink"], false);
    assert_eq!(
        value["outputs"][0]["container-profile"]["meta-video-profile"]["format"],
        "video/x-h264"
    );
}

#[test]
fn render_follows_config() {
    let mut job = Job::new();
    job.add_input(INPUT).unwrap();

    let compact = GraphConfig::from_json(r#"{"output": {"pretty_json": false}}"#).unwrap();
    assert!(!transjob::render(&job, &compact).contains('\n'));
    assert!(transjob::render(&job, &GraphConfig::default()).contains('\n'));
}

#[test]
fn config_file_drives_guessing() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"formats": {{"extensions": {{"mkv": "video/x-matroska", "mp4": "video/quicktime"}}, "extra": ["video/quicktime"]}}}}"#
    )
    .unwrap();

    let mut job = transjob::job_from_config_file(Some(file.path()));
    job.map_video_stream(INPUT, "0", "file:///out.mp4").unwrap();
    let value = job.to_value();
    assert_eq!(
        value["outputs"][0]["container-profile"]["format"],
        "video/quicktime"
    );
}
