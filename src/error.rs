//! Crate-wide error type.

/// Errors produced by `box-envoy`.
///
/// The placement engine reports a full grid through
/// [`Placement::Rejected`](crate::grid::Placement::Rejected); the error form is used
/// only where a caller asks for a placement that must succeed.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum Error {
    /// A box side outside `1..=5` reached the placement engine.
    #[display("dimension {_0} is outside 1..=5")]
    InvalidDimension(#[error(not(source))] u8),

    /// No free anchor exists for a `width × height` box.
    #[display("no room for a {width}x{height} box")]
    PlacementRejected {
        /// Requested width.
        width: u8,
        /// Requested height.
        height: u8,
    },

    /// An embassy task could not be spawned (its pool is already in use).
    #[display("task spawn failed: {_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// The character LCD did not acknowledge a transaction.
    #[display("character LCD transaction failed")]
    Display,
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
