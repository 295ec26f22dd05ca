use std::fmt;

/// Maximum task text length, enforced at input time.
pub const TEXT_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyText,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyText => f.write_str("Task cannot be empty."),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Rejects text that is empty after trimming whitespace. The stored text is
/// the raw input; trimming is only used for the emptiness check.
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(())
}

/// True when the input sits exactly at the character cap. Edge-triggered at
/// the boundary, not at-or-above; the input control itself prevents longer
/// text.
pub fn at_text_limit(text: &str) -> bool {
    text.chars().count() == TEXT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert_eq!(validate_text(""), Err(ValidationError::EmptyText));
        assert_eq!(validate_text("   \t"), Err(ValidationError::EmptyText));
        assert_eq!(validate_text("  pay rent  "), Ok(()));
    }

    #[test]
    fn limit_check_triggers_only_at_the_boundary() {
        let at_cap = "x".repeat(TEXT_LIMIT);
        let under_cap = "x".repeat(TEXT_LIMIT - 1);

        assert!(at_text_limit(&at_cap));
        assert!(!at_text_limit(&under_cap));
        assert!(!at_text_limit(""));
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        let accented = "é".repeat(TEXT_LIMIT);
        assert!(at_text_limit(&accented));
    }
}
