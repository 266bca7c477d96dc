//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from planner and IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A leg was built from no segments
    #[error("leg must have at least one segment")]
    EmptyLeg,

    /// Invalid leg construction (e.g., arrival before departure)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),
}
