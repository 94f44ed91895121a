//! Error and result types shared across the crate.

use thiserror::Error;

/// Errors raised by the record store and the layers built on top of it.
#[derive(Error, Debug)]
pub enum Error {
    /// Lookup or delete on an id the store does not hold.
    #[error("user not found: {id}")]
    NotFound { id: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// True for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = Error::not_found("u42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "user not found: u42");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::other("boom");
        let err: Error = io.into();
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("boom"));
    }
}
