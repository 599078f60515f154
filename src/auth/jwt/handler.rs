//! Core JWT handler implementation
//!
//! Tokens carry identity only. Roles and permissions are resolved from the
//! store on every check, so a sync takes effect without reissuing tokens.

use super::types::{Claims, JwtHandler, TokenPair, TokenType};
use crate::config::AuthConfig;
use crate::utils::error::{GatewayError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let secret = config.jwt_secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: "identity-gateway".to_string(),
        })
    }

    /// Create an access token for a user
    pub fn create_access_token(&self, user_uuid: Uuid) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| GatewayError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user_uuid,
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
            aud: "api".to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Access,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(GatewayError::Jwt)?;

        debug!("Created access token for user: {}", user_uuid);
        Ok(token)
    }

    /// Create a refresh token for a user
    pub fn create_refresh_token(&self, user_uuid: Uuid) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| GatewayError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user_uuid,
            iat: now,
            exp: now + (self.expiration * 24), // Refresh tokens last 24x longer
            iss: self.issuer.clone(),
            aud: "refresh".to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Refresh,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(GatewayError::Jwt)?;

        debug!("Created refresh token for user: {}", user_uuid);
        Ok(token)
    }

    /// Create a token pair (access + refresh)
    pub fn create_token_pair(&self, user_uuid: Uuid) -> Result<TokenPair> {
        let access_token = self.create_access_token(user_uuid)?;
        let refresh_token = self.create_refresh_token(user_uuid)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expiration,
        })
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&["api", "refresh"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("JWT verification failed: {}", e);
            GatewayError::Jwt(e)
        })?;

        debug!("Token verified for user: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Verify an access token and return the holder's UUID
    pub fn verify_access_token(&self, token: &str) -> Result<Uuid> {
        let claims = self.verify_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(GatewayError::unauthenticated(
                "Invalid token type for API access",
            ));
        }

        Ok(claims.sub)
    }

    /// Verify a refresh token and return the holder's UUID
    pub fn verify_refresh_token(&self, token: &str) -> Result<Uuid> {
        let claims = self.verify_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(GatewayError::unauthenticated(
                "Invalid token type for refresh",
            ));
        }

        Ok(claims.sub)
    }
}
