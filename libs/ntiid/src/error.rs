//! Error types for NTIID parsing, construction, and resolution.

use thiserror::Error;

/// Boxed error returned by resolver implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when parsing, building, or resolving NTIIDs.
#[derive(Debug, Error)]
pub enum NtiidError {
    /// The string does not match the NTIID grammar or character set.
    #[error("invalid NTIID '{candidate}': {reason}")]
    InvalidFormat { candidate: String, reason: String },

    /// Not enough information was supplied to build an NTIID.
    #[error("cannot build NTIID: missing required field '{field}'")]
    MissingRequiredField { field: &'static str },

    /// Safing the input left no representable characters.
    #[error("cannot make '{input}' safe for use in an NTIID")]
    UnrepresentableInput { input: String },

    /// A registered resolver failed internally.
    #[error(transparent)]
    Resolver(BoxError),
}

impl NtiidError {
    pub(crate) fn invalid(candidate: impl Into<String>, reason: impl Into<String>) -> Self {
        NtiidError::InvalidFormat {
            candidate: candidate.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error indicates a malformed NTIID string.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, NtiidError::InvalidFormat { .. })
    }

    /// Returns true if this error indicates a missing constructor field.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, NtiidError::MissingRequiredField { .. })
    }

    /// Returns true if this error indicates input that could not be safed.
    pub fn is_unrepresentable(&self) -> bool {
        matches!(self, NtiidError::UnrepresentableInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("backing store offline")]
    struct StoreOffline;

    #[test]
    fn test_resolver_error_is_transparent() {
        let err = NtiidError::Resolver(Box::new(StoreOffline));
        assert_eq!(err.to_string(), "backing store offline");
        assert!(!err.is_invalid_format());
    }

    #[test]
    fn test_predicates() {
        assert!(NtiidError::invalid("x", "bad").is_invalid_format());
        assert!(NtiidError::MissingRequiredField { field: "nttype" }.is_missing_field());
        assert!(NtiidError::UnrepresentableInput {
            input: "   ".to_string()
        }
        .is_unrepresentable());
    }
}
