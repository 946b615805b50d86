use thiserror::Error as ThisError;

/// Field constraint violations detected before a write reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must not contain NUL characters")]
    NulCharacter { field: &'static str },

    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: i64 },

    #[error("role must be one of CAPTAIN, BOATSWAIN, DECKHAND (got `{0}`)")]
    UnknownRole(String),

    #[error("record {index}: {source}")]
    InRecord {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    pub(crate) fn in_record(self, index: usize) -> Self {
        ValidationError::InRecord {
            index,
            source: Box::new(self),
        }
    }
}
