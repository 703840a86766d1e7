use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Dialog failures. The notifier turns every one of these into a stop.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{program} failed with status: {status}")]
    Failed {
        program: &'static str,
        status: ExitStatus,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
