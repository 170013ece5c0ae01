//! Password Strength Rules
//!
//! Five independent composition rules. Every violated rule is reported, in a
//! fixed order, so a form can show all messages at once.

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters accepted as "special" by the symbol rule
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

// ============================================================================
// Violations
// ============================================================================

/// A single failed password rule
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PasswordViolation {
    #[error("Password must be at least 8 characters long")]
    TooShort,

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one number")]
    MissingNumber,

    #[error("Password must contain at least one special character")]
    MissingSpecialCharacter,
}

/// Result of [`check_password_strength`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    pub ok: bool,
    pub violations: Vec<PasswordViolation>,
}

impl PasswordStrength {
    /// User-facing messages, in rule order
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Check a password against every rule
///
/// Length counts Unicode scalar values. Letter and digit rules are ASCII-only.
pub fn check_password_strength(password: &str) -> PasswordStrength {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(PasswordViolation::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PasswordViolation::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PasswordViolation::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PasswordViolation::MissingNumber);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        violations.push(PasswordViolation::MissingSpecialCharacter);
    }

    PasswordStrength {
        ok: violations.is_empty(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password() {
        let strength = check_password_strength("MySecure#Pass2024!");
        assert!(strength.ok);
        assert!(strength.violations.is_empty());
    }

    #[test]
    fn test_empty_password_reports_every_rule() {
        let strength = check_password_strength("");
        assert!(!strength.ok);
        assert_eq!(
            strength.violations,
            vec![
                PasswordViolation::TooShort,
                PasswordViolation::MissingUppercase,
                PasswordViolation::MissingLowercase,
                PasswordViolation::MissingNumber,
                PasswordViolation::MissingSpecialCharacter,
            ]
        );
    }

    #[test]
    fn test_single_rule_flips() {
        let base = "Abcdef1!";
        assert!(check_password_strength(base).ok);

        assert_eq!(
            check_password_strength("Abcde1!").violations,
            vec![PasswordViolation::TooShort]
        );
        assert_eq!(
            check_password_strength("abcdef1!").violations,
            vec![PasswordViolation::MissingUppercase]
        );
        assert_eq!(
            check_password_strength("ABCDEF1!").violations,
            vec![PasswordViolation::MissingLowercase]
        );
        assert_eq!(
            check_password_strength("Abcdefg!").violations,
            vec![PasswordViolation::MissingNumber]
        );
        assert_eq!(
            check_password_strength("Abcdefg1").violations,
            vec![PasswordViolation::MissingSpecialCharacter]
        );
    }

    #[test]
    fn test_every_special_character_counts() {
        for symbol in SPECIAL_CHARACTERS.chars() {
            let password = format!("Abcdef1{symbol}");
            assert!(check_password_strength(&password).ok, "symbol {symbol}");
        }
        // Underscore and dash are not in the accepted set
        assert!(!check_password_strength("Abcdef1_").ok);
        assert!(!check_password_strength("Abcdef1-").ok);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 7 characters, more than 8 bytes
        let strength = check_password_strength("Äbcdé1!");
        assert!(strength.violations.contains(&PasswordViolation::TooShort));
    }

    #[test]
    fn test_messages() {
        let strength = check_password_strength("abcdefgh");
        assert_eq!(
            strength.messages(),
            vec![
                "Password must contain at least one uppercase letter".to_string(),
                "Password must contain at least one number".to_string(),
                "Password must contain at least one special character".to_string(),
            ]
        );
    }
}
