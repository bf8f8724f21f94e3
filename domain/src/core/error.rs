//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Event name cannot be empty")]
    EmptyEventName,

    #[error("Main topic cannot be empty")]
    EmptyMainTopic,

    #[error("Number of panels must be between 1 and {max}, got {got}")]
    InvalidPanelCount { got: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_panel_count_display() {
        let error = DomainError::InvalidPanelCount { got: 0, max: 20 };
        assert_eq!(
            error.to_string(),
            "Number of panels must be between 1 and 20, got 0"
        );
    }
}
