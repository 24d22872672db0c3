use crate::types::DbId;

/// Closed set of domain error kinds produced below the transport layer.
///
/// Every multi-row invariant failure surfaces as one of these; the HTTP
/// layer translates them to status codes exactly once. Nothing in this
/// crate or the data layer knows about status codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity id does not exist (fetch target, house
    /// attachment target, or enrollment target).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A unique-name constraint would be violated.
    #[error("{entity} named '{name}' already exists")]
    DuplicateName { entity: &'static str, name: String },

    /// A house or enrollment reference turned out dangling mid-transaction.
    #[error("{entity} with id {id} is referenced but does not exist")]
    Referential { entity: &'static str, id: DbId },

    /// Malformed input that survived transport-level parsing.
    #[error("{0}")]
    Validation(String),
}
