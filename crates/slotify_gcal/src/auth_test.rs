#[cfg(test)]
mod tests {
    use crate::auth::{build_authorization_url, AUTH_ENDPOINT};
    use slotify_config::GoogleConfig;

    fn test_config() -> GoogleConfig {
        GoogleConfig {
            client_id: "client-123.apps.googleusercontent.com".to_string(),
            client_secret: "shh".to_string(),
            redirect_uri: "https://api.example.com/api/schedule/book/slot".to_string(),
            calendar_id: "primary".to_string(),
        }
    }

    #[test]
    fn authorization_url_targets_google_and_carries_state() {
        let url = build_authorization_url(
            &test_config(),
            "https://www.googleapis.com/auth/calendar",
            "slotabc123",
        )
        .unwrap();

        assert!(url.starts_with(AUTH_ENDPOINT));
        assert!(url.contains("client_id=client-123.apps.googleusercontent.com"));
        assert!(url.contains("state=slotabc123"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("access_type=offline"));
        // scope is percent-encoded
        assert!(url.contains("scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fcalendar"));
    }

    #[test]
    fn redirect_uri_is_percent_encoded() {
        let url = build_authorization_url(&test_config(), "scope", "s").unwrap();
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapi.example.com%2Fapi%2Fschedule%2Fbook%2Fslot"));
    }
}
