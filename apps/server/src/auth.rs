use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use storefront_core::users::{validate_sign_up, User, UserRole};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{error_response, ApiResult};
use crate::main_lib::AppState;

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
}

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Admin role required")]
    Forbidden,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Authentication is not configured for this server")]
    NotConfigured,
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub auth_enabled: bool,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(&config.jwt_secret);
        let decoding_key = DecodingKey::from_secret(&config.jwt_secret);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key,
            decoding_key,
            validation,
            token_ttl: config.access_token_ttl,
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Failed to hash password: {e}")))
    }

    pub fn verify_password(&self, password_hash: &str, candidate: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::Internal(format!("Stored password hash is invalid: {e}")))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AuthError::InvalidCredentials,
                other => AuthError::Internal(format!("Password verification failed: {other}")),
            })
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user.id.clone(),
            role: user.role,
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
                | jsonwebtoken::errors::ErrorKind::Json(_)
                | jsonwebtoken::errors::ErrorKind::Base64(_)
                | jsonwebtoken::errors::ErrorKind::Utf8(_) => AuthError::Unauthorized,
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            })
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::Unauthorized | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::NotConfigured => StatusCode::NOT_FOUND,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.to_string())
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

fn auth_manager(state: &AppState) -> Result<Arc<AuthManager>, AuthError> {
    state.auth.clone().ok_or(AuthError::NotConfigured)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(AuthError::Unauthorized);
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::Unauthorized);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthorized);
    }
    Ok(token)
}

/// Resolves the bearer token to a user that still exists.
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<(User, Claims), AuthError> {
    let auth = auth_manager(state)?;
    let claims = auth.validate_token(bearer_token(headers)?)?;
    let user = state
        .user_service
        .get_user(&claims.sub)
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .ok_or(AuthError::Unauthorized)?;
    Ok((user, claims))
}

fn login_response(auth: &AuthManager, user: User) -> Result<LoginResponse, AuthError> {
    let token = auth.issue_token(&user)?;
    Ok(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: auth.expires_in().as_secs(),
        user,
    })
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Credentials>,
) -> ApiResult<(StatusCode, Json<LoginResponse>)> {
    let auth = auth_manager(&state)?;
    let email = validate_sign_up(&payload.email, &payload.password)?;
    debug!("Registering customer {}...", email);
    let password_hash = auth.hash_password(&payload.password)?;
    let user = state
        .user_service
        .register_customer(&email, &password_hash)
        .await?;
    info!("Customer {} signed up", user.id);
    Ok((StatusCode::CREATED, Json(login_response(&auth, user)?)))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Credentials>,
) -> ApiResult<Json<LoginResponse>> {
    let auth = auth_manager(&state)?;
    let user = state
        .user_service
        .find_by_email(&payload.email)?
        .ok_or(AuthError::InvalidCredentials)?;
    auth.verify_password(&user.password_hash, &payload.password)?;
    debug!("User {} logged in", user.id);
    Ok(Json(login_response(&auth, user)?))
}

async fn auth_status(State(state): State<Arc<AppState>>) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        auth_enabled: state.auth.is_some(),
    })
}

async fn me(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult<Json<User>> {
    let (user, _) = authenticate(&state, &headers)?;
    Ok(Json(user))
}

/// Admin gate. The role is re-read from the database so demoted or deleted
/// users lose access before their token expires.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let (user, _claims) = authenticate(&state, request.headers())?;
    if !user.is_admin() {
        return Err(AuthError::Forbidden);
    }
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Admin identity inserted by [`require_admin`].
pub type CurrentUser = Extension<User>;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/status", get(auth_status))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn manager() -> AuthManager {
        AuthManager::new(&AuthConfig {
            jwt_secret: b"0123456789abcdef0123456789abcdef".to_vec(),
            access_token_ttl: Duration::from_secs(60),
        })
    }

    fn user(role: UserRole) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: "u1".to_string(),
            email: "a@example.com".to_string(),
            password_hash: String::new(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn decode_secret_accepts_ascii_and_base64() {
        let ascii = "0123456789abcdef0123456789abcdef";
        assert_eq!(decode_secret_key(ascii).unwrap().len(), 32);
        let b64 = BASE64.encode([7u8; 32]);
        assert_eq!(decode_secret_key(&b64).unwrap(), vec![7u8; 32]);
        assert!(decode_secret_key("short").is_err());
        assert!(decode_secret_key("   ").is_err());
    }

    #[test]
    fn token_carries_user_and_role() {
        let auth = manager();
        let token = auth.issue_token(&user(UserRole::Admin)).unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert!(claims.is_admin());
        assert!(matches!(
            auth.validate_token("not-a-token"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn password_hash_round_trip() {
        let auth = manager();
        let hash = auth.hash_password("correct horse").unwrap();
        assert!(auth.verify_password(&hash, "correct horse").is_ok());
        assert!(matches!(
            auth.verify_password(&hash, "wrong horse"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());
        headers.insert(AUTHORIZATION, "Basic abc".parse().unwrap());
        assert!(bearer_token(&headers).is_err());
        headers.insert(AUTHORIZATION, "bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers).unwrap(), "abc");
    }
}
