// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

/// Failures the data-access collaborators can surface. Anything else that
/// goes wrong with record shapes is absorbed by the transforms and never
/// becomes an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("application round not found")]
    NotFound,
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Which fetch of a view's load sequence failed. The round fetch gates the
/// dependent ones, and the two phases report under different messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Round,
    Collections,
}

/// Message key for the dismissible error notice a failed fetch raises.
pub fn notice_key(phase: FetchPhase, error: &FetchError) -> &'static str {
    match (phase, error) {
        (FetchPhase::Round, FetchError::NotFound) => "errors.applicationRoundNotFound",
        (FetchPhase::Round, FetchError::Transport(_)) => "errors.errorFetchingData",
        (FetchPhase::Collections, _) => "errors.errorFetchingApplications",
    }
}
