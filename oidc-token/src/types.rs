mod token_response;

pub use token_response::{
    TokenResponse, MISSING_ACCESS_TOKEN_ERROR, MISSING_EXPIRES_IN_ERROR, MISSING_TOKEN_TYPE_ERROR,
    TOKEN_RESPONSE_KEY,
};
