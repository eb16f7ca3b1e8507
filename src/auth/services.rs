use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::auth::{
    dto::{LoginRequest, SignupRequest},
    password::{hash_password, verify_password},
    repo::UserStore,
    repo_types::{NewUser, User},
};
use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex");
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn signup(users: &dyn UserStore, req: SignupRequest) -> Result<User, ApiError> {
    let email = normalize_email(&req.email);
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }
    if users.find_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::Unauthorized("User already exists"));
    }

    let password_hash = hash_password(&req.password)?;
    let user = users
        .insert(NewUser {
            email,
            first_name: req.first_name,
            last_name: req.last_name,
            password_hash,
        })
        .await?
        // lost a race with a concurrent signup
        .ok_or(ApiError::Unauthorized("User already exists"))?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

pub async fn login(users: &dyn UserStore, req: LoginRequest) -> Result<User, ApiError> {
    let email = normalize_email(&req.email);
    let Some(user) = users.find_by_email(&email).await? else {
        warn!(%email, "login unknown email");
        return Err(ApiError::Unauthorized("user details not found, try signing up"));
    };
    if !verify_password(&req.password, &user.password_hash)? {
        warn!(%email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("incorrect password"));
    }
    info!(user_id = %user.id, "user logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeUsers;

    fn signup_req(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[tokio::test]
    async fn signup_then_login() {
        let users = FakeUsers::default();
        let user = signup(&users, signup_req("Ada@Example.com", "pw-123456")).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_ne!(user.password_hash, "pw-123456");

        let logged = login(
            &users,
            LoginRequest {
                email: "ada@example.com".into(),
                password: "pw-123456".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(logged.id, user.id);
    }

    #[tokio::test]
    async fn duplicate_signup_is_rejected() {
        let users = FakeUsers::default();
        signup(&users, signup_req("a@b.co", "x")).await.unwrap();
        let err = signup(&users, signup_req("A@B.co", "y")).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized("User already exists")));
    }

    #[tokio::test]
    async fn login_failures_are_distinguished() {
        let users = FakeUsers::default();
        signup(&users, signup_req("a@b.co", "right")).await.unwrap();

        let wrong = login(&users, LoginRequest { email: "a@b.co".into(), password: "wrong".into() })
            .await
            .unwrap_err();
        assert!(matches!(wrong, ApiError::Unauthorized("incorrect password")));

        let unknown = login(&users, LoginRequest { email: "z@b.co".into(), password: "x".into() })
            .await
            .unwrap_err();
        assert!(matches!(
            unknown,
            ApiError::Unauthorized("user details not found, try signing up")
        ));
    }
}
