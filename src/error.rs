//! Programming-error surface for the blueprint compiler.
//!
//! This is distinct from [`crate::problem::Problem`]: a `Problem` is a
//! verification finding that accumulates in a blueprint's problem lists.
//! A [`BlueprintError`] is raised when a caller violates an API precondition
//! that verification itself cannot express as a problem, per the core's
//! error handling design (no partial descriptor is ever emitted).

use thiserror::Error;

/// Result type alias for fallible blueprint-compiler operations.
pub type Result<T> = std::result::Result<T, BlueprintError>;

/// Programming errors raised by the descriptor builder and id normalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlueprintError {
    // ========================================================================
    // Descriptor builder preconditions
    // ========================================================================
    /// The descriptor builder was invoked on a blueprint that has not been
    /// verified, or whose verification produced problems.
    #[error("blueprint is not verified; call `verify()` and check `verified()` first")]
    InvalidBlueprint,

    // ========================================================================
    // Identifier normalization
    // ========================================================================
    /// `normalizeAppId` reduced the raw application id to the empty string.
    #[error("application id '{0}' normalizes to an empty string")]
    InvalidApplicationId(String),
}
