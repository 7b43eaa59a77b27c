//! Error types for the holdout-world crate.

/// Errors that can occur during world-state operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A location with the same name already exists.
    #[error("duplicate location name: {name}")]
    DuplicateLocation {
        /// The colliding name.
        name: String,
    },

    /// No location with the given name exists.
    #[error("unknown location: {name}")]
    UnknownLocation {
        /// The name that failed to resolve.
        name: String,
    },
}
