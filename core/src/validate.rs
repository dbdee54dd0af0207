use crate::error::ValidationError;

/// Longest label the input control accepts.
pub const MAX_LABEL_LEN: usize = 42;

/// Reject labels that cannot be claimed. Runs once, at submission time.
pub fn validate_label(raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty);
    }
    if raw.contains(' ') || raw.chars().any(char::is_uppercase) {
        return Err(ValidationError::Unsupported);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_rejected() {
        assert_eq!(validate_label(""), Err(ValidationError::Empty));
    }

    #[test]
    fn spaces_and_capitals_are_rejected() {
        for name in ["alice bob", " alice", "alice ", "Alice", "aLICE", "ÉCOLE", " "] {
            assert_eq!(
                validate_label(name),
                Err(ValidationError::Unsupported),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn lowercase_names_pass_unchanged() {
        for name in ["alice", "bob-42", "0x", "über", "a.b", "\talice"] {
            assert!(validate_label(name).is_ok(), "{name:?} should pass");
        }
    }
}
