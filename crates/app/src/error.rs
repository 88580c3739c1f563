use threadline_client::ApiError;
use threadline_core::error::CoreError;
use threadline_core::types::DbId;

/// Failure of a controller operation.
///
/// Users see one generic message for every variant except
/// [`LifecycleError::Busy`]; the variants exist so callers and tests can tell
/// the cases apart.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// Rejected locally before any request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backend call failed or was refused.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Another status change for the same entity has not finished yet.
    #[error("A status change for {entity} {id} is already in flight")]
    Busy { entity: &'static str, id: DbId },
}

/// Coarse classification of a [`LifecycleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Local validation failed (missing field, unlisted transition, unknown id).
    Validation,
    /// Network failure or timeout.
    Transport,
    /// The backend answered but refused or returned garbage.
    Backend,
    Busy,
}

impl LifecycleError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LifecycleError::Core(_) => FailureKind::Validation,
            LifecycleError::Api(e) if e.is_transport() => FailureKind::Transport,
            LifecycleError::Api(_) => FailureKind::Backend,
            LifecycleError::Busy { .. } => FailureKind::Busy,
        }
    }
}
