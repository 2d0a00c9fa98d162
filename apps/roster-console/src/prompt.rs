//! Re-prompting input helpers.
//!
//! Empty text, text that isn't a whole number, and numbers outside the
//! allowed range never leave this module: dialoguer prints the message and
//! asks again.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use roster_core::MAX_NAME_LEN;

/// Reads a non-blank line of at most [`MAX_NAME_LEN`] characters, trimmed.
pub fn text(label: &str) -> dialoguer::Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .validate_with(|input: &String| check_text(input))
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Reads a whole number within `min..=max`.
pub fn number(label: &str, min: i64, max: i64) -> dialoguer::Result<i64> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .validate_with(|input: &i64| check_range(*input, min, max))
        .interact_text()
}

pub(crate) fn check_text(input: &str) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Empty input is not allowed".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!("At most {} characters", MAX_NAME_LEN));
    }
    Ok(())
}

pub(crate) fn check_range(value: i64, min: i64, max: i64) -> Result<(), String> {
    if value < min {
        Err(format!("Number must be >= {}", min))
    } else if value > max {
        Err(format!("Number must be <= {}", max))
    } else {
        Ok(())
    }
}
