//! Token pair validation.
//!
//! `TokenValidator` is the seam for whatever actually vouches for the token
//! pair. `DoubleSubmitValidator` is the stock implementation: both halves
//! must be present, bounded, visible ASCII and equal (compared in constant time).

use async_trait::async_trait;
use subtle::ConstantTimeEq;

use crate::config::DEFAULT_MAX_TOKEN_LENGTH;

/// The token pair was checked and rejected. Always answered with 403.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("the required anti-forgery cookie is not present")]
    MissingCookieToken,
    #[error("the required anti-forgery header value is not present")]
    MissingHeaderToken,
    #[error("the anti-forgery token could not be decoded")]
    Malformed,
    #[error("the anti-forgery cookie token and header token do not match")]
    Mismatch,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    #[error(transparent)]
    Rejected(#[from] ValidationError),
    /// The validator could not reach a verdict (remote key store down, etc.).
    /// Only validators with a backend produce this; the double-submit check never does.
    #[allow(dead_code)]
    #[error("token validator backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, cookie_token: &str, header_token: &str) -> Result<(), ValidatorError>;
}

#[derive(Debug, Clone, Copy)]
pub struct DoubleSubmitValidator {
    max_token_length: usize,
}

impl Default for DoubleSubmitValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKEN_LENGTH)
    }
}

impl DoubleSubmitValidator {
    pub fn new(max_token_length: usize) -> Self {
        Self { max_token_length }
    }

    pub fn check(&self, cookie_token: &str, header_token: &str) -> Result<(), ValidationError> {
        if cookie_token.is_empty() {
            return Err(ValidationError::MissingCookieToken);
        }
        if header_token.is_empty() {
            return Err(ValidationError::MissingHeaderToken);
        }
        if !self.well_formed(cookie_token) || !self.well_formed(header_token) {
            return Err(ValidationError::Malformed);
        }

        // ct_eq on slices of different length returns false without leaking where they differ
        let equal: bool = cookie_token
            .as_bytes()
            .ct_eq(header_token.as_bytes())
            .into();
        if !equal {
            return Err(ValidationError::Mismatch);
        }

        Ok(())
    }

    fn well_formed(&self, token: &str) -> bool {
        token.len() <= self.max_token_length && token.bytes().all(|b| b.is_ascii_graphic())
    }
}

#[async_trait]
impl TokenValidator for DoubleSubmitValidator {
    async fn validate(&self, cookie_token: &str, header_token: &str) -> Result<(), ValidatorError> {
        self.check(cookie_token, header_token)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_pair_passes() {
        let v = DoubleSubmitValidator::default();
        assert_eq!(v.check("abc123", "abc123"), Ok(()));
    }

    #[test]
    fn missing_halves_are_reported_separately() {
        let v = DoubleSubmitValidator::default();
        assert_eq!(v.check("", "abc"), Err(ValidationError::MissingCookieToken));
        assert_eq!(v.check("abc", ""), Err(ValidationError::MissingHeaderToken));
        assert_eq!(v.check("", ""), Err(ValidationError::MissingCookieToken));
    }

    #[test]
    fn mismatch_is_rejected() {
        let v = DoubleSubmitValidator::default();
        assert_eq!(v.check("abc123", "abc124"), Err(ValidationError::Mismatch));
        assert_eq!(v.check("abc", "abcd"), Err(ValidationError::Mismatch));
    }

    #[test]
    fn oversized_tokens_are_malformed() {
        let v = DoubleSubmitValidator::new(4);
        assert_eq!(v.check("abcd", "abcd"), Ok(()));
        assert_eq!(v.check("abcde", "abcde"), Err(ValidationError::Malformed));
    }

    #[test]
    fn undecodable_tokens_are_malformed() {
        let v = DoubleSubmitValidator::default();
        assert_eq!(
            v.check("ab\u{FFFD}c", "ab\u{FFFD}c"),
            Err(ValidationError::Malformed)
        );
        assert_eq!(v.check("abc", "ab c"), Err(ValidationError::Malformed));
    }

    #[tokio::test]
    async fn trait_impl_wraps_rejection() {
        let v = DoubleSubmitValidator::default();
        assert!(v.validate("t", "t").await.is_ok());

        let err = v.validate("t", "u").await.unwrap_err();
        assert!(matches!(
            err,
            ValidatorError::Rejected(ValidationError::Mismatch)
        ));
    }
}
