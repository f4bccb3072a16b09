use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use validator::Validate;

use super::repo_types::User;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 30,
        message = "O nome de usuário deve ter entre 1 e 30 caracteres."
    ))]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "E-mail inválido."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "A senha deve ter, no mínimo, 8 caracteres."))]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl CreateUserRequest {
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self
    }
}

/// Request body for `PUT /users/:id`; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(
        min = 1,
        max = 30,
        message = "O nome de usuário deve ter entre 1 e 30 caracteres."
    ))]
    pub username: Option<String>,
    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "A senha deve ter, no mínimo, 8 caracteres."))]
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl UpdateUserRequest {
    pub fn normalized(mut self) -> Self {
        self.username = self.username.map(|u| u.trim().to_string());
        self.email = self.email.map(|e| e.trim().to_lowercase());
        self
    }
}

/// Request body for login. Either identifier may be used.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub password: String,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            is_admin: u.is_admin,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rules() {
        let ok = CreateUserRequest {
            username: " carla ".into(),
            email: " Carla@Example.com ".into(),
            password: "longenough".into(),
            is_admin: false,
        }
        .normalized();
        assert_eq!(ok.username, "carla");
        assert_eq!(ok.email, "carla@example.com");
        assert!(ok.validate().is_ok());

        let bad = CreateUserRequest {
            username: "   ".into(),
            email: "not-an-email".into(),
            password: "short".into(),
            is_admin: false,
        }
        .normalized();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn update_request_skips_absent_fields() {
        assert!(UpdateUserRequest::default().validate().is_ok());

        let bad = UpdateUserRequest {
            password: Some("short".into()),
            ..Default::default()
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn public_user_has_no_password() {
        let user = User {
            id: 1,
            username: "dan".into(),
            email: "dan@example.com".into(),
            password: "$argon2id$secret".into(),
            is_admin: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        let raw = serde_json::to_string(&user).unwrap();
        assert!(!raw.contains("password"));
        let public = serde_json::to_value(PublicUser::from(user)).unwrap();
        assert!(public.get("password").is_none());
        assert_eq!(public["created_at"], "1970-01-01T00:00:00Z");
    }
}
