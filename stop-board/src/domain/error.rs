//! Domain error types.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Stop identifiers must contain at least one non-whitespace character
    #[error("stop id must not be empty")]
    EmptyStopId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(DomainError::EmptyStopId.to_string(), "stop id must not be empty");
    }
}
