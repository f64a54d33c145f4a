
use crate::{JwtAlgorithm, TokenLifetimes, TokenService};

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
pub(crate) const RSA_PRIVATE_PEM: &str = include_str!("fixtures/rsa_private.pem");
pub(crate) const RSA_PUBLIC_PEM: &str = include_str!("fixtures/rsa_public.pem");

pub(crate) fn hs256_service() -> TokenService {
    TokenService::new(
        JwtAlgorithm::HS256 {
            secret: TEST_SECRET.to_vec(),
        },
        TokenLifetimes::default(),
    )
    .unwrap()
}
