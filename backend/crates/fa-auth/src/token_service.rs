//! Token issuance and validation.
//!
//! One process-wide `TokenService` holds the signing and verification keys,
//! built once at startup. Issuing and validating are pure computations.

use crate::{AuthError, Claims, JwtAlgorithm, Result as AuthErrorResult, TokenLifetimes, TokenPair, TokenType};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::debug;

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    lifetimes: TokenLifetimes,
}

impl TokenService {
    #[track_caller]
    pub fn new(algorithm: JwtAlgorithm, lifetimes: TokenLifetimes) -> AuthErrorResult<Self> {
        let (encoding_key, decoding_key, alg) = match algorithm {
            JwtAlgorithm::HS256 { ref secret } => (
                EncodingKey::from_secret(secret),
                DecodingKey::from_secret(secret),
                Algorithm::HS256,
            ),
            JwtAlgorithm::RS256 {
                ref private_key_pem,
                ref public_key_pem,
            } => {
                let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
                    .map_err(|e| AuthError::InvalidKey {
                        message: format!("Invalid RSA private key: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
                    .map_err(|e| AuthError::InvalidKey {
                        message: format!("Invalid RSA public key: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                (encoding_key, decoding_key, Algorithm::RS256)
            }
        };

        let mut validation = Validation::new(alg);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = lifetimes.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key,
            decoding_key,
            header: Header::new(alg),
            validation,
            lifetimes,
        })
    }

    /// Mint a fresh access + refresh token pair for `subject`
    #[track_caller]
    pub fn issue(&self, subject: &str) -> AuthErrorResult<TokenPair> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    pub(crate) fn issue_at(&self, subject: &str, now: i64) -> AuthErrorResult<TokenPair> {
        let access = Claims::new(subject, TokenType::Access, now, self.lifetimes.access_ttl_secs);
        let refresh = Claims::new(subject, TokenType::Refresh, now, self.lifetimes.refresh_ttl_secs);

        Ok(TokenPair {
            access_token: self.sign(&access)?,
            refresh_token: self.sign(&refresh)?,
        })
    }

    /// Exchange a valid refresh token for a new access token.
    /// The refresh token itself stays valid until its own expiry.
    #[track_caller]
    pub fn refresh(&self, refresh_token: &str) -> AuthErrorResult<String> {
        let claims = self.validate(refresh_token, TokenType::Refresh)?;
        debug!("Refreshing access token for {}", claims.sub);

        let access = Claims::new(
            &claims.sub,
            TokenType::Access,
            Utc::now().timestamp(),
            self.lifetimes.access_ttl_secs,
        );
        self.sign(&access)
    }

    /// Validate an access token and return its subject
    #[track_caller]
    pub fn authorize(&self, access_token: &str) -> AuthErrorResult<String> {
        self.validate(access_token, TokenType::Access)
            .map(|claims| claims.sub)
    }

    /// Verify signature, expiry and token type
    #[track_caller]
    pub fn validate(&self, token: &str, expected: TokenType) -> AuthErrorResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                    location: ErrorLocation::from(Location::caller()),
                },
                _ => AuthError::JwtDecode {
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                },
            })?;

        token_data.claims.validate(expected)?;

        Ok(token_data.claims)
    }

    /// Get the algorithm being used (for logging/debugging)
    pub fn algorithm(&self) -> &str {
        match self.header.alg {
            Algorithm::HS256 => "HS256",
            Algorithm::RS256 => "RS256",
            _ => "unknown",
        }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    #[track_caller]
    fn sign(&self, claims: &Claims) -> AuthErrorResult<String> {
        encode(&self.header, claims, &self.encoding_key).map_err(|e| AuthError::JwtEncode {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
