//! Domain error taxonomy

use thiserror::Error;

use crate::data::DataError;

/// Errors raised by domain services
///
/// Every variant aborts the operation before anything is written, except
/// `Data`, which wraps a storage failure.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A referenced id does not resolve
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A reference resolves but belongs to the wrong parent
    #[error("{0}")]
    InvalidAssociation(String),

    /// Field-level input constraint failed
    #[error("{0}")]
    Validation(String),

    /// The extractor produced no requirements
    #[error("Unable to extract requirements")]
    ExtractionEmpty,

    /// Unique value already taken, or a parent vanished mid-write
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Data(DataError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_association(message: impl Into<String>) -> Self {
        Self::InvalidAssociation(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<DataError> for DomainError {
    fn from(e: DataError) -> Self {
        match e {
            DataError::Conflict(message) => Self::Conflict(message),
            other => Self::Data(other),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = DomainError::not_found("Project", 7);
        assert_eq!(err.to_string(), "Project not found: 7");
    }

    #[test]
    fn test_conflict_lifted_from_data() {
        let err: DomainError = DataError::Conflict("User email already exists".into()).into();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err: DomainError = DataError::Sqlite(sqlx::Error::PoolClosed).into();
        assert!(matches!(err, DomainError::Data(_)));
    }
}
