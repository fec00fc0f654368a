mod error;
mod types;

pub use error::{Error, MissingField, Result};
pub use oidc_common::{Persistable, Restore};
pub use types::{
    TokenResponse, MISSING_ACCESS_TOKEN_ERROR, MISSING_EXPIRES_IN_ERROR, MISSING_TOKEN_TYPE_ERROR,
    TOKEN_RESPONSE_KEY,
};
