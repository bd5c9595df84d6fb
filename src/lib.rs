//! transjob - declarative transcoding job graphs.
//!
//! Re-exports the member crates so callers depend on one package:
//! shared types from `tj-core` and the graph from `tj-graph`.

pub use tj_core::{
    config, EntityKind, Error, FormatId, GraphConfig, InputId, JobId, MediaType, OutputId, Result,
};
pub use tj_graph::{
    CodecAttributeCopier, ContainerProfile, ExtensionGuesser, FormatGuesser, Input, Job,
    JobSummary, NoopCopier, Output, ProfileCore, StreamProfile, StreamRef,
};

/// Build a job from an optional configuration file.
///
/// A missing or unreadable file falls back to the built-in defaults.
pub fn job_from_config_file(path: Option<&std::path::Path>) -> Job {
    let config = GraphConfig::load_or_default(path);
    Job::from_config(&config)
}

/// Render `job` the way `config` asks for.
pub fn render(job: &Job, config: &GraphConfig) -> String {
    job.to_json(config.output.pretty_json)
}
