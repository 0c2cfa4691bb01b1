//! Password complexity rules.
//!
//! Pure rule-checker, independent of storage and hashing. Every violated
//! rule is reported, not just the first.

use crate::domain::password::RawPassword;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyRule {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    NoSpaces,
}

impl PolicyRule {
    /// Human-readable message for the violated rule.
    pub fn message(self) -> &'static str {
        match self {
            PolicyRule::MinLength => "Password must be at least 8 characters long.",
            PolicyRule::Uppercase => "Password must contain at least one uppercase letter.",
            PolicyRule::Lowercase => "Password must contain at least one lowercase letter.",
            PolicyRule::Digit => "Password must contain at least one digit.",
            PolicyRule::NoSpaces => "Password must not contain spaces.",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Evaluate every rule against the raw password, returning the violated
    /// ones. An empty result means the password is compliant.
    pub fn validate(&self, password: &RawPassword) -> Vec<PolicyRule> {
        let raw = password.expose();
        let mut violations = Vec::new();

        if raw.chars().count() < MIN_PASSWORD_LENGTH {
            violations.push(PolicyRule::MinLength);
        }
        if !raw.chars().any(|c| c.is_ascii_uppercase()) {
            violations.push(PolicyRule::Uppercase);
        }
        if !raw.chars().any(|c| c.is_ascii_lowercase()) {
            violations.push(PolicyRule::Lowercase);
        }
        if !raw.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PolicyRule::Digit);
        }
        if raw.chars().any(|c| c.is_whitespace()) {
            violations.push(PolicyRule::NoSpaces);
        }

        violations
    }
}
