//! Error types and handling for the `TrailPlan` planning engine

use thiserror::Error;

/// Main error type for the `TrailPlan` library
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Input validation errors (rejected before any state is touched)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A referenced itinerary, visit, or POI is missing or not owned by the requester
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A referenced itinerary was concurrently modified before an edit completed
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The external conditions provider failed; always recovered locally
    #[error("Provider unavailable: {message}")]
    Provider { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PlannerError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PlannerError::NotFound { .. } => {
                "The requested itinerary or visit could not be found.".to_string()
            }
            PlannerError::Conflict { .. } => {
                "The itinerary was modified by another operation. Please retry.".to_string()
            }
            PlannerError::Provider { .. } => {
                "External travel data is temporarily unavailable. Offline estimates were used."
                    .to_string()
            }
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let validation_err = PlannerError::validation("days_count out of range");
        assert!(matches!(validation_err, PlannerError::Validation { .. }));

        let not_found_err = PlannerError::not_found("itinerary 7");
        assert!(matches!(not_found_err, PlannerError::NotFound { .. }));

        let conflict_err = PlannerError::conflict("visit removed concurrently");
        assert!(matches!(conflict_err, PlannerError::Conflict { .. }));
    }

    #[test]
    fn test_user_messages() {
        let validation_err = PlannerError::validation("days_count must be 1..=30");
        assert!(validation_err.user_message().contains("days_count must be"));

        let provider_err = PlannerError::provider("OSRM timed out");
        assert!(provider_err.user_message().contains("Offline estimates"));

        let not_found_err = PlannerError::not_found("visit 3");
        assert!(not_found_err.user_message().contains("could not be found"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let planner_err: PlannerError = io_err.into();
        assert!(matches!(planner_err, PlannerError::Io { .. }));
    }
}
