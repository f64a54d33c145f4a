use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] fa_config::ConfigError),

    #[error("Failed to read JWT key file {path}: {source}")]
    JwtKeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Token service error: {0}")]
    Auth(#[from] fa_auth::AuthError),

    #[error("Provider setup error: {0}")]
    Provider(#[from] fa_providers::ProviderError),

    #[error("Database error: {0}")]
    Db(#[from] fa_db::DbError),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
