/// Supported JWT algorithms
#[derive(Clone)]
pub enum JwtAlgorithm {
    /// HMAC with SHA-256 (symmetric key)
    HS256 { secret: Vec<u8> },
    /// RSA with SHA-256 (asymmetric key pair)
    RS256 {
        private_key_pem: String,
        public_key_pem: String,
    },
}

impl JwtAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HS256 { .. } => "HS256",
            Self::RS256 { .. } => "RS256",
        }
    }
}

impl std::fmt::Debug for JwtAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JwtAlgorithm::{} {{ <redacted> }}", self.name())
    }
}
