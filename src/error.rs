//! Error types for the Tariff Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur around price calculation.
//! The pricing calculator itself never fails; these errors come from the
//! catalog, the configuration loader and the billing simulation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Tariff Engine.
///
/// # Example
///
/// ```
/// use tariff_engine::error::EngineError;
///
/// let error = EngineError::TariffNotFound {
///     tariff_id: "T042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Tariff not found: T042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No tariff with the given id exists in the catalog.
    #[error("Tariff not found: {tariff_id}")]
    TariffNotFound {
        /// The id that was looked up.
        tariff_id: String,
    },

    /// A tariff with the given id is already in the catalog.
    #[error("Tariff already exists: {tariff_id}")]
    DuplicateTariff {
        /// The conflicting id.
        tariff_id: String,
    },

    /// A tariff definition violates the rate step rules.
    #[error("Invalid tariff '{tariff_id}': {message}")]
    InvalidTariff {
        /// The id of the invalid tariff.
        tariff_id: String,
        /// A description of what made the tariff invalid.
        message: String,
    },

    /// A collection index was outside the collection bounds.
    #[error("Index {index} out of range for collection of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The collection length at the time of the request.
        len: usize,
    },

    /// A meter reading was rejected.
    #[error("Invalid meter reading on {date}: {message}")]
    InvalidReading {
        /// The date of the rejected reading.
        date: NaiveDate,
        /// A description of what made the reading invalid.
        message: String,
    },

    /// Not enough meter readings to derive a consumption.
    #[error("At least {required} meter readings are required for billing, found {found}")]
    InsufficientReadings {
        /// The minimum number of readings.
        required: usize,
        /// The number of readings available.
        found: usize,
    },

    /// A billing document transition was not allowed from its current status.
    #[error("Billing document '{document_id}': {message}")]
    InvalidDocumentState {
        /// The id of the billing document.
        document_id: String,
        /// A description of the rejected transition.
        message: String,
    },

    /// A request value is outside the accepted range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidRequest {
        /// The offending request field.
        field: String,
        /// A description of the accepted range.
        message: String,
    },

    /// A monetary amount exceeded the decimal range.
    #[error("Amount overflow while {context}")]
    AmountOverflow {
        /// The computation that overflowed.
        context: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/catalog.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/catalog.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_tariff_displays_id_and_message() {
        let error = EngineError::InvalidTariff {
            tariff_id: "T003".to_string(),
            message: "rate steps are not contiguous".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid tariff 'T003': rate steps are not contiguous"
        );
    }

    #[test]
    fn test_duplicate_tariff_displays_id() {
        let error = EngineError::DuplicateTariff {
            tariff_id: "T001".to_string(),
        };
        assert_eq!(error.to_string(), "Tariff already exists: T001");
    }

    #[test]
    fn test_index_out_of_range_displays_index_and_len() {
        let error = EngineError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(
            error.to_string(),
            "Index 5 out of range for collection of length 3"
        );
    }

    #[test]
    fn test_invalid_reading_displays_date_and_message() {
        let error = EngineError::InvalidReading {
            date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            message: "value is lower than the previous reading".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid meter reading on 2025-06-30: value is lower than the previous reading"
        );
    }

    #[test]
    fn test_insufficient_readings_displays_counts() {
        let error = EngineError::InsufficientReadings {
            required: 2,
            found: 1,
        };
        assert_eq!(
            error.to_string(),
            "At least 2 meter readings are required for billing, found 1"
        );
    }

    #[test]
    fn test_invalid_request_displays_field() {
        let error = EngineError::InvalidRequest {
            field: "billing_months".to_string(),
            message: "must not exceed 1200, got 5000".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for 'billing_months': must not exceed 1200, got 5000"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::TariffNotFound {
                tariff_id: "T999".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
