// src/strength.rs
//! Password strength policy
//!
//! Separate from hashing: callers run [`PasswordPolicy::check`] at signup or
//! reset, then call `hash_password`. Hashing itself never rejects weak input.

use std::fmt;

/// One reason a password failed the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthIssue {
    TooShort { min: usize },
    TooLong { max: usize },
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
    MissingSymbol,
}

impl fmt::Display for StrengthIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthIssue::TooShort { min } => write!(f, "must be at least {min} characters"),
            StrengthIssue::TooLong { max } => write!(f, "must be at most {max} characters"),
            StrengthIssue::MissingLowercase => f.write_str("must contain a lowercase letter"),
            StrengthIssue::MissingUppercase => f.write_str("must contain an uppercase letter"),
            StrengthIssue::MissingDigit => f.write_str("must contain a digit"),
            StrengthIssue::MissingSymbol => f.write_str("must contain a symbol"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_len: usize,
    pub max_len: usize,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_digit: bool,
    pub require_symbol: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_len: 8,
            max_len: 128,
            require_lowercase: true,
            require_uppercase: true,
            require_digit: true,
            require_symbol: true,
        }
    }
}

impl PasswordPolicy {
    /// Length limits only, no character classes
    pub fn length_only(min_len: usize, max_len: usize) -> Self {
        Self {
            min_len,
            max_len,
            require_lowercase: false,
            require_uppercase: false,
            require_digit: false,
            require_symbol: false,
        }
    }

    /// Every violated rule, in a stable order. Lengths count chars, not bytes.
    pub fn check(&self, plaintext: &str) -> Result<(), Vec<StrengthIssue>> {
        let mut issues = Vec::new();
        let len = plaintext.chars().count();

        if len < self.min_len {
            issues.push(StrengthIssue::TooShort { min: self.min_len });
        }
        if len > self.max_len {
            issues.push(StrengthIssue::TooLong { max: self.max_len });
        }
        if self.require_lowercase && !plaintext.chars().any(char::is_lowercase) {
            issues.push(StrengthIssue::MissingLowercase);
        }
        if self.require_uppercase && !plaintext.chars().any(char::is_uppercase) {
            issues.push(StrengthIssue::MissingUppercase);
        }
        if self.require_digit && !plaintext.chars().any(|c| c.is_ascii_digit()) {
            issues.push(StrengthIssue::MissingDigit);
        }
        if self.require_symbol
            && !plaintext
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
        {
            issues.push(StrengthIssue::MissingSymbol);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    pub fn is_acceptable(&self, plaintext: &str) -> bool {
        self.check(plaintext).is_ok()
    }
}
