use tracing::{info, warn};
use validator::Validate;

use super::{
    dto::CreateUserRequest,
    repo::UserStore,
    repo_types::NewUser,
};
use crate::{auth::password::hash_password_blocking, config::BootstrapAdmin};

/// Creates the configured administrator when the store has none.
///
/// Returns `true` when an account was created.
pub async fn ensure_bootstrap_admin(
    users: &dyn UserStore,
    bootstrap: Option<&BootstrapAdmin>,
) -> anyhow::Result<bool> {
    let Some(admin) = bootstrap else {
        return Ok(false);
    };
    if users.count_admins().await? > 0 {
        return Ok(false);
    }

    let request = CreateUserRequest {
        username: admin.username.clone(),
        email: admin.email.clone(),
        password: admin.password.clone(),
        is_admin: true,
    }
    .normalized();
    request
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid bootstrap admin: {e}"))?;

    let password_hash = hash_password_blocking(request.password).await?;
    let user = users
        .create(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            is_admin: true,
        })
        .await?;

    info!(user_id = user.id, username = %user.username, "bootstrap admin created");
    warn!("change the bootstrap admin password and unset BOOTSTRAP_ADMIN_PASSWORD");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDb;

    fn bootstrap() -> BootstrapAdmin {
        BootstrapAdmin {
            username: "admin".into(),
            email: "admin@example.com".into(),
            password: "admin-password".into(),
        }
    }

    #[tokio::test]
    async fn creates_admin_once() {
        let db = MemoryDb::default();
        assert!(ensure_bootstrap_admin(&db, Some(&bootstrap())).await.unwrap());
        assert!(!ensure_bootstrap_admin(&db, Some(&bootstrap())).await.unwrap());

        let users = UserStore::list(&db).await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(users[0].is_admin);
        assert_ne!(users[0].password, "admin-password");
    }

    #[tokio::test]
    async fn skipped_without_configuration() {
        let db = MemoryDb::default();
        assert!(!ensure_bootstrap_admin(&db, None).await.unwrap());
        assert_eq!(db.count_admins().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_weak_bootstrap_password() {
        let db = MemoryDb::default();
        let mut weak = bootstrap();
        weak.password = "short".into();
        assert!(ensure_bootstrap_admin(&db, Some(&weak)).await.is_err());
    }
}
