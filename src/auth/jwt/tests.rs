//! JWT module tests

#[cfg(test)]
mod tests {
    use crate::auth::jwt::types::{JwtHandler, TokenType};
    use crate::config::AuthConfig;
    use uuid::Uuid;

    fn create_test_handler() -> JwtHandler {
        let config = AuthConfig {
            jwt_secret: "test_secret_key_for_testing_only_32b".to_string(),
            jwt_expiration: 3600,
            guard: "api".to_string(),
            bootstrap: Default::default(),
        };

        JwtHandler::new(&config).unwrap()
    }

    #[test]
    fn test_create_and_verify_access_token() {
        let handler = create_test_handler();
        let user_uuid = Uuid::new_v4();

        let token = handler.create_access_token(user_uuid).unwrap();

        let claims = handler.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_uuid);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.aud, "api");
    }

    #[test]
    fn test_create_token_pair() {
        let handler = create_test_handler();
        let user_uuid = Uuid::new_v4();

        let token_pair = handler.create_token_pair(user_uuid).unwrap();

        assert!(!token_pair.access_token.is_empty());
        assert!(!token_pair.refresh_token.is_empty());
        assert_eq!(token_pair.token_type, "Bearer");
        assert_eq!(token_pair.expires_in, 3600);

        // Verify both tokens
        let access_uuid = handler
            .verify_access_token(&token_pair.access_token)
            .unwrap();
        let refresh_uuid = handler
            .verify_refresh_token(&token_pair.refresh_token)
            .unwrap();

        assert_eq!(access_uuid, user_uuid);
        assert_eq!(refresh_uuid, user_uuid);
    }

    #[test]
    fn test_refresh_token_rejected_for_access() {
        let handler = create_test_handler();
        let user_uuid = Uuid::new_v4();

        let refresh = handler.create_refresh_token(user_uuid).unwrap();
        assert!(handler.verify_access_token(&refresh).is_err());

        let access = handler.create_access_token(user_uuid).unwrap();
        assert!(handler.verify_refresh_token(&access).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        let header = "Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let token = JwtHandler::extract_token_from_header(header).unwrap();
        assert_eq!(token, "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");

        let invalid_header = "Basic dXNlcjpwYXNz";
        assert!(JwtHandler::extract_token_from_header(invalid_header).is_none());
    }

    #[test]
    fn test_invalid_token_verification() {
        let handler = create_test_handler();
        let invalid_token = "invalid.jwt.token";

        let result = handler.verify_token(invalid_token);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let handler = create_test_handler();
        let other = JwtHandler::new(&AuthConfig {
            jwt_secret: "another_secret_key_for_testing_only_32b".to_string(),
            jwt_expiration: 3600,
            guard: "api".to_string(),
            bootstrap: Default::default(),
        })
        .unwrap();

        let token = handler.create_access_token(Uuid::new_v4()).unwrap();
        assert!(other.verify_token(&token).is_err());
    }
}
