pub mod adapter;
pub mod error;
pub mod github;
pub mod google;
pub mod http_client;
pub mod linkedin;
pub mod local;
pub mod oauth_client;
pub mod password;
pub mod registry;

pub use adapter::{AuthorizationCode, OAuthProvider, ProviderAdapter};
pub use error::{ProviderError, Result, Stage};
pub use github::GithubProvider;
pub use google::GoogleProvider;
pub use http_client::build_http_client;
pub use linkedin::LinkedinProvider;
pub use local::{LocalAdapter, LocalCredentials};
pub use oauth_client::OAuthClient;
pub use registry::ProviderRegistry;

#[cfg(test)]
mod tests;
