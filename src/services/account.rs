use crate::db;
use crate::forms::{FormRejection, Login, Register};
use crate::models::{Role, User};
use crate::services::{ServiceError, StoreError};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub const SESSION_TOKEN_LEN: usize = 64;
pub const ACTIVATE_CODE_LEN: usize = 32;

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn username_or_email_taken(&self, username: &str, email: &str) -> Result<bool, StoreError>;
    async fn insert_user(&self, user: User) -> Result<User, StoreError>;
    async fn fetch_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn set_activate_code(&self, user_id: Uuid, code: &str) -> Result<(), StoreError>;
    async fn activate(&self, code: &str) -> Result<Option<User>, StoreError>;
    async fn insert_session(&self, token: &str, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<(), StoreError>;
    async fn delete_session(&self, token: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl AccountStore for PgPool {
    async fn username_or_email_taken(&self, username: &str, email: &str) -> Result<bool, StoreError> {
        Ok(db::user::exists_with_username_or_email(self, username, email).await?)
    }

    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        Ok(db::user::insert(self, user).await?)
    }

    async fn fetch_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(db::user::fetch_by_username(self, username).await?)
    }

    async fn set_activate_code(&self, user_id: Uuid, code: &str) -> Result<(), StoreError> {
        Ok(db::user::set_activate_code(self, user_id, code).await?)
    }

    async fn activate(&self, code: &str) -> Result<Option<User>, StoreError> {
        Ok(db::user::activate(self, code).await?)
    }

    async fn insert_session(&self, token: &str, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<(), StoreError> {
        db::session::insert(self, token, user_id, expires_at).await?;
        Ok(())
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        Ok(db::session::delete(self, token).await?)
    }
}

pub fn generate_token(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}

pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("Failed to hash password: {}", err);
            StoreError::Hashing(err.to_string())
        })
}

/// A malformed stored hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::warn!("Stored password hash is malformed: {}", err);
            false
        }
    }
}

/// Link sent in confirmation mails.
pub fn activation_link(public_url: &str, code: &str) -> String {
    format!("{}/auth/activate/{}", public_url.trim_end_matches('/'), code)
}

/// A signed in user together with the token of the new session.
pub struct SignedIn {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for SignedIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedIn")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

async fn start_session<S>(store: &S, user: User, ttl: Duration) -> Result<SignedIn, ServiceError>
where
    S: AccountStore + ?Sized,
{
    let token = generate_token(SESSION_TOKEN_LEN);
    let expires_at = Utc::now() + ttl;
    store.insert_session(&token, user.id, expires_at).await?;

    Ok(SignedIn {
        user,
        token,
        expires_at,
    })
}

pub async fn register<S>(store: &S, command: Register, ttl: Duration) -> Result<SignedIn, ServiceError>
where
    S: AccountStore + ?Sized,
{
    if store
        .username_or_email_taken(&command.username, &command.email)
        .await?
    {
        let mut rejection = FormRejection::form("Username or email is already taken");
        rejection.add_field("username", command.username);
        rejection.add_field("email", command.email);
        return Err(rejection.into());
    }

    let user = User {
        id: Uuid::new_v4(),
        username: command.username,
        email: command.email,
        password_hash: hash_password(&command.password)?,
        role: Role::User,
        activated_at: None,
        activate_code: Some(generate_token(ACTIVATE_CODE_LEN)),
        avatar: None,
        created_at: Utc::now(),
    };
    let user = store.insert_user(user).await?;
    tracing::info!(user_id = %user.id, "User registered");

    start_session(store, user, ttl).await
}

pub async fn login<S>(store: &S, command: Login, ttl: Duration) -> Result<SignedIn, ServiceError>
where
    S: AccountStore + ?Sized,
{
    let user = store.fetch_by_username(&command.username).await?;
    let user = match user {
        Some(user) if verify_password(&command.password, &user.password_hash) => user,
        _ => {
            let mut rejection = FormRejection::form("Invalid username or password");
            rejection.add_field("username", command.username);
            return Err(rejection.into());
        }
    };

    start_session(store, user, ttl).await
}

pub async fn logout<S>(store: &S, token: &str) -> Result<(), ServiceError>
where
    S: AccountStore + ?Sized,
{
    Ok(store.delete_session(token).await?)
}

/// Stores a fresh activation code for `user` and returns it.
pub async fn issue_activate_code<S>(store: &S, user: &User) -> Result<String, ServiceError>
where
    S: AccountStore + ?Sized,
{
    if user.is_activated() {
        return Err(FormRejection::form("Account is already activated").into());
    }

    let code = generate_token(ACTIVATE_CODE_LEN);
    store.set_activate_code(user.id, &code).await?;
    Ok(code)
}

pub async fn activate<S>(store: &S, code: &str) -> Result<Option<User>, ServiceError>
where
    S: AccountStore + ?Sized,
{
    Ok(store.activate(code).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::InMemoryStore;

    fn register_command(username: &str) -> Register {
        Register {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "correct horse battery".to_string(),
        }
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("s3cret-pass").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret-pass", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret-pass", "not a hash"));
    }

    #[test]
    fn tokens_are_alphanumeric() {
        let token = generate_token(SESSION_TOKEN_LEN);

        assert_eq!(token.len(), SESSION_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_token(SESSION_TOKEN_LEN));
    }

    #[test]
    fn activation_links_are_absolute() {
        assert_eq!(
            activation_link("https://tourbase.example/", "abc"),
            "https://tourbase.example/auth/activate/abc"
        );
    }

    #[tokio::test]
    async fn register_then_login() {
        let store = InMemoryStore::default();

        let signed_in = register(&store, register_command("alice"), Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(signed_in.user.role, Role::User);
        assert!(signed_in.user.activate_code.is_some());
        assert!(store.has_session(&signed_in.token));

        let login_command = Login {
            username: "alice".to_string(),
            password: "correct horse battery".to_string(),
        };
        let again = login(&store, login_command, Duration::hours(1)).await.unwrap();
        assert_eq!(again.user.id, signed_in.user.id);
        assert_ne!(again.token, signed_in.token);

        logout(&store, &again.token).await.unwrap();
        assert!(!store.has_session(&again.token));
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let store = InMemoryStore::default();
        register(&store, register_command("bob"), Duration::hours(1))
            .await
            .unwrap();

        let err = register(&store, register_command("bob"), Duration::hours(1))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn wrong_password_is_a_form_error() {
        let store = InMemoryStore::default();
        register(&store, register_command("carol"), Duration::hours(1))
            .await
            .unwrap();

        let command = Login {
            username: "carol".to_string(),
            password: "nope".to_string(),
        };
        match login(&store, command, Duration::hours(1)).await.unwrap_err() {
            ServiceError::Invalid(rejection) => {
                assert_eq!(rejection.form_error.as_deref(), Some("Invalid username or password"));
                assert!(!rejection.fields.contains_key("password"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn activation_consumes_the_code() {
        let store = InMemoryStore::default();
        let signed_in = register(&store, register_command("dave"), Duration::hours(1))
            .await
            .unwrap();

        let code = issue_activate_code(&store, &signed_in.user).await.unwrap();
        let user = activate(&store, &code).await.unwrap().unwrap();

        assert!(user.is_activated());
        assert!(activate(&store, &code).await.unwrap().is_none());
        assert!(issue_activate_code(&store, &user).await.is_err());
    }
}
