//! # tj-graph
//!
//! Job graph builder and profile resolution.
//!
//! A [`Job`] maps streams of input URIs onto output URIs. Each mapping
//! produces a [`StreamProfile`] that inherits its format from the output's
//! [`ContainerProfile`]; outputs created without one get a container format
//! guessed from their URI.
//!
//! ## Overview
//!
//! - [`Job`] -- owns inputs and outputs, resolves mappings, renders JSON.
//! - [`Input`] -- a source URI and the profiles bound to each stream id.
//! - [`Output`] -- a destination URI and its container profile.
//! - [`StreamProfile`] / [`ContainerProfile`] -- encoding settings.
//! - [`FormatGuesser`] / [`CodecAttributeCopier`] -- pluggable policies.
//!
//! ```
//! use tj_graph::Job;
//! use tj_core::FormatId;
//!
//! let mut job = Job::new();
//! let stream = job
//!     .map_video_stream("file:///in.ts", "0", "file:///out.mkv")
//!     .unwrap();
//! let profile = job.stream_profile(&stream).unwrap();
//! assert_eq!(profile.format(), FormatId::NONE);
//! assert!(job.map_audio_stream("file:///in.ts", "0", "file:///out.mkv").is_err());
//! ```

mod document;
pub mod input;
pub mod job;
pub mod output;
pub mod policy;
pub mod profile;

pub use input::Input;
pub use job::{Job, JobSummary, StreamRef};
pub use output::Output;
pub use policy::{CodecAttributeCopier, ExtensionGuesser, FormatGuesser, NoopCopier};
pub use profile::{ContainerProfile, ProfileCore, StreamProfile};
