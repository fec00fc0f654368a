use crate::types::{MISSING_ACCESS_TOKEN_ERROR, MISSING_EXPIRES_IN_ERROR, MISSING_TOKEN_TYPE_ERROR};
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

/// A required token response field that is absent or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    AccessToken,
    TokenType,
    ExpiresIn,
}

impl MissingField {
    pub fn message(self) -> &'static str {
        match self {
            Self::AccessToken => MISSING_ACCESS_TOKEN_ERROR,
            Self::TokenType => MISSING_TOKEN_TYPE_ERROR,
            Self::ExpiresIn => MISSING_EXPIRES_IN_ERROR,
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    MissingField(MissingField),
    #[error("invalid expires_in: {0}")]
    InvalidExpiresIn(#[from] ParseIntError),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
