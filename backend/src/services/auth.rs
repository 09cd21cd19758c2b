//! Registration and login
//!
//! Password hashing and verification run on the blocking thread pool.
//! Every login failure maps to the same `Invalid credentials` error; the
//! failing factor only appears in server logs.

use crate::auth::{JwtService, PasswordService};
use crate::error::{ApiError, ALREADY_EXISTS};
use crate::repositories::{CreateUserError, NewUser, UserRecord, UserStore};
use auth_service_shared::validation::{
    normalize_email, normalize_username, validate_email, validate_password, validate_username,
};
use auth_service_shared::{LoginRequest, PublicUser, RegisterRequest};
use tracing::{info, instrument, warn};

/// Authentication operations
pub struct AuthService;

impl AuthService {
    /// Register a new user
    ///
    /// The duplicate pre-check only saves a hash computation; the store's
    /// uniqueness check on insert is what actually prevents duplicates.
    #[instrument(skip_all, fields(username = %req.username))]
    pub async fn register(
        users: &dyn UserStore,
        req: RegisterRequest,
    ) -> Result<PublicUser, ApiError> {
        let username = normalize_username(&req.username);
        let email = normalize_email(&req.email);

        validate_username(&username).map_err(ApiError::Validation)?;
        validate_email(&email).map_err(ApiError::Validation)?;
        validate_password(&req.password).map_err(ApiError::Validation)?;

        if users
            .find_by_username_or_email(&username, &email)
            .await?
            .is_some()
        {
            warn!("registration rejected: username or email taken");
            return Err(ApiError::Conflict(ALREADY_EXISTS.to_string()));
        }

        let password_hash = PasswordService::hash_async(req.password).await?;

        let user = users
            .insert(NewUser {
                username,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                CreateUserError::Duplicate => {
                    warn!("registration lost insert race: username or email taken");
                    ApiError::Conflict(ALREADY_EXISTS.to_string())
                }
                CreateUserError::Database(err) => ApiError::Database(err),
            })?;

        info!(user_id = user.id, "user registered");
        Ok(public_user(user))
    }

    /// Login with username or email and password, returning a signed token
    #[instrument(skip_all)]
    pub async fn login(
        users: &dyn UserStore,
        jwt_service: &JwtService,
        req: LoginRequest,
    ) -> Result<String, ApiError> {
        let identifier = req.username_or_email.trim();

        let user = match users
            .find_by_username_or_email(identifier, &normalize_email(identifier))
            .await?
        {
            Some(user) => user,
            None => {
                PasswordService::verify_dummy_async(req.password).await;
                warn!("login failed: unknown identifier");
                return Err(ApiError::invalid_credentials());
            }
        };

        let valid = match PasswordService::verify_async(req.password, user.password_hash).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!(user_id = user.id, error = %e, "login failed: stored hash unusable");
                false
            }
        };

        if !valid {
            warn!(user_id = user.id, "login failed: password mismatch");
            return Err(ApiError::invalid_credentials());
        }

        let token = jwt_service.generate_token(user.id)?;

        info!(user_id = user.id, "user logged in");
        Ok(token)
    }

    /// Look up the user a verified token belongs to
    ///
    /// A token for a user that no longer exists is treated like any other
    /// invalid token.
    #[instrument(skip(users))]
    pub async fn current_user(users: &dyn UserStore, user_id: i64) -> Result<PublicUser, ApiError> {
        let user = users.find_by_id(user_id).await?.ok_or_else(|| {
            warn!("token subject has no user record");
            ApiError::invalid_token()
        })?;

        Ok(public_user(user))
    }
}

fn public_user(user: UserRecord) -> PublicUser {
    PublicUser {
        id: user.id,
        username: user.username,
        email: user.email,
    }
}
