//! # Validation Module
//!
//! Input validation for Roster.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (console / HTML form / JSON body)                  │
//! │  ├── Shape checks: is this a number at all?                            │
//! │  └── Re-prompt or 400 response, never reaches the core                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository call                                              │
//! │  └── THIS MODULE: schema rules (lengths, ranges, positivity)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL + CHECK constraints                                      │
//! │  ├── UNIQUE (student_id, course_id)                                    │
//! │  └── Foreign keys with ON DELETE CASCADE                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use roster_core::validation::{validate_full_name, validate_credits};
//!
//! assert!(validate_full_name("Anna Bērziņa").is_ok());
//! assert!(validate_credits(61).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_AGE, MAX_CREDITS, MAX_NAME_LEN, MIN_AGE, MIN_CREDITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Checks a required, length-limited text field and returns it trimmed.
///
/// Length is counted in characters, not bytes: "Jānis Kalniņš" is 13.
fn validate_required_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(value.to_string())
}

/// Validates a student's full name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 80 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_full_name(name: &str) -> ValidationResult<String> {
    validate_required_text("full_name", name)
}

/// Validates a course title.
///
/// Same rules as [`validate_full_name`].
pub fn validate_title(title: &str) -> ValidationResult<String> {
    validate_required_text("title", title)
}

/// Validates a student search fragment.
///
/// ## Rules
/// - Must not be empty or whitespace-only
///
/// ## Returns
/// The trimmed fragment.
pub fn validate_search_fragment(fragment: &str) -> ValidationResult<String> {
    let fragment = fragment.trim();

    if fragment.is_empty() {
        return Err(ValidationError::Required {
            field: "name_part".to_string(),
        });
    }

    Ok(fragment.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn validate_range(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(())
}

/// Validates a student's age: 1 to 120 inclusive.
pub fn validate_age(age: i64) -> ValidationResult<()> {
    validate_range("age", age, MIN_AGE, MAX_AGE)
}

/// Validates a course's credit count: 1 to 60 inclusive.
pub fn validate_credits(credits: i64) -> ValidationResult<()> {
    validate_range("credits", credits, MIN_CREDITS, MAX_CREDITS)
}

/// Validates the threshold of the "courses with minimum credits" report.
///
/// ## Rules
/// - Must be at least 1 (no upper bound: a threshold above 60 simply matches nothing)
pub fn validate_min_credits(min_credits: i64) -> ValidationResult<()> {
    if min_credits < MIN_CREDITS {
        return Err(ValidationError::OutOfRange {
            field: "min_credits".to_string(),
            min: MIN_CREDITS,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a surrogate id supplied by a caller.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// No existence check happens here; that is the repository's job.
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_full_name() {
        assert_eq!(validate_full_name("  Anna Bērziņa ").unwrap(), "Anna Bērziņa");

        assert!(validate_full_name("").is_err());
        assert!(validate_full_name("   ").is_err());
        assert!(validate_full_name(&"A".repeat(81)).is_err());
        assert!(validate_full_name(&"A".repeat(80)).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 80 two-byte characters is still within the limit
        let name = "ā".repeat(80);
        assert!(name.len() > 80);
        assert!(validate_full_name(&name).is_ok());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Datubāzes").is_ok());
        assert!(matches!(
            validate_title(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_age_boundaries() {
        assert!(validate_age(1).is_ok());
        assert!(validate_age(120).is_ok());

        assert!(validate_age(0).is_err());
        assert!(validate_age(121).is_err());
        assert!(validate_age(-5).is_err());
    }

    #[test]
    fn test_validate_credits_boundaries() {
        assert!(validate_credits(1).is_ok());
        assert!(validate_credits(60).is_ok());

        assert!(validate_credits(0).is_err());
        assert!(validate_credits(61).is_err());
    }

    #[test]
    fn test_validate_min_credits() {
        assert!(validate_min_credits(1).is_ok());
        assert!(validate_min_credits(500).is_ok());
        assert!(validate_min_credits(0).is_err());
    }

    #[test]
    fn test_validate_search_fragment() {
        assert_eq!(validate_search_fragment(" jān ").unwrap(), "jān");
        assert!(validate_search_fragment("").is_err());
        assert!(validate_search_fragment(" \t ").is_err());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("student_id", 1).is_ok());
        assert!(validate_id("student_id", 0).is_err());
        assert!(validate_id("student_id", -3).is_err());
    }
}
