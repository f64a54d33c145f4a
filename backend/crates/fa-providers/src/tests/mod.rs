
use fa_config::OAuthClientConfig;

pub(crate) fn client_config(client_id: &str) -> OAuthClientConfig {
    OAuthClientConfig {
        client_id: Some(client_id.to_string()),
        client_secret: Some("shh".to_string()),
        redirect_uri: Some("http://localhost:5000/login/test/callback".to_string()),
        ..OAuthClientConfig::default()
    }
}
