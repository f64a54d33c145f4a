pub mod claims;
pub mod error;
pub mod jwt_algorithm;
pub mod token_lifetimes;
pub mod token_pair;
pub mod token_service;
pub mod token_type;

pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwt_algorithm::JwtAlgorithm;
pub use token_lifetimes::TokenLifetimes;
pub use token_pair::TokenPair;
pub use token_service::TokenService;
pub use token_type::TokenType;

#[cfg(test)]
mod tests;
