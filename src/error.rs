// error.rs
use bevy::prelude::*;

/// A required collaborator was not wired up. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("{owner} requires `{field}` but none was assigned")]
    MissingCollaborator {
        owner: &'static str,
        field: &'static str,
    },
    #[error("{owner} `{field}` points at {entity:?}, which has no {requirement}")]
    DanglingReference {
        owner: &'static str,
        field: &'static str,
        entity: Entity,
        requirement: &'static str,
    },
    #[error("no camera is tagged as the viewer")]
    MissingViewer,
    #[error("the item tracker resource was never inserted")]
    MissingTracker,
    #[error("the item tracker was initialized without any items to find")]
    NoTrackedItems,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
