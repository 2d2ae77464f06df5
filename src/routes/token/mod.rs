mod handler;
mod model;

pub use handler::{generate_token, get_token, set_expiry, verify_token};
pub use model::{
    ExpiryRequest, ExpiryResponse, REASON_EXPIRED, TokenResponse, VerifyRequest, VerifyResponse,
};
