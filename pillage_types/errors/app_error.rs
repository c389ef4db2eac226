use thiserror::Error;
use uuid::Uuid;

use crate::common::VillageId;

/// Errors for the client side: network collaborator and local state.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Server answered {status} on {path}: {message}")]
    HttpStatus {
        path: String,
        status: u16,
        message: String,
    },

    #[error("Request to {path} failed: {reason}")]
    Transport { path: String, reason: String },

    #[error("No village loaded")]
    NoVillageLoaded,

    #[error("Village {0} is not loaded")]
    VillageNotLoaded(VillageId),

    /// The server took the action but the village could not be read back.
    #[error("Action accepted, but the village could not be reloaded: {reason}")]
    SnapshotUnavailable { reason: String },

    #[error("Unknown pending action {0}")]
    UnknownPendingAction(Uuid),

    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),
}
