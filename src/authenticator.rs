use serde::Serialize;
use sqlx::{Pool, Sqlite};

use crate::crypto::{hash_password, verify_password, TokenSigner};
use crate::db::{SystemUser, UserRepository};
use crate::error::AppError;
use crate::identity::Identity;

/// Password accepted for accounts provisioned without one.
///
/// This is a backdoor inherited from how accounts are provisioned; it is only
/// honoured while `allow_default_password` is on.
pub const DEFAULT_PASSWORD: &str = "123456";

pub const DEFAULT_ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
    pub image: Option<String>,
}

#[derive(Clone)]
pub struct Authenticator {
    db: Pool<Sqlite>,
    signer: TokenSigner,
    allow_default_password: bool,
}

impl Authenticator {
    pub fn new(db: Pool<Sqlite>, signer: TokenSigner, allow_default_password: bool) -> Self {
        Self {
            db,
            signer,
            allow_default_password,
        }
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Find the identity owning `email`: system users first, then teachers,
    /// then students.
    pub async fn resolve_identity(&self, email: &str) -> Result<Option<Identity>, AppError> {
        if let Some(user) = UserRepository::find_system_user_by_email(&self.db, email).await? {
            return Ok(Some(Identity::SystemUser(user)));
        }
        if let Some(teacher) = UserRepository::find_teacher_by_email(&self.db, email).await? {
            return Ok(Some(Identity::Teacher(teacher)));
        }
        if let Some(student) = UserRepository::find_student_by_email(&self.db, email).await? {
            return Ok(Some(Identity::Student(student)));
        }
        Ok(None)
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        let identity = self
            .resolve_identity(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.password_matches(&identity, password) {
            tracing::debug!("Password rejected for {}", email);
            return Err(AppError::InvalidCredentials);
        }

        let id = identity.id().to_string();
        let token = self.signer.issue(&id, identity.role())?;

        tracing::info!("✅ {} signed in as {}", email, identity.role());

        Ok(AuthenticatedUser {
            id,
            name: identity.display_name().to_string(),
            email: identity.email().to_string(),
            role: identity.role().to_string(),
            token,
            image: identity.image().map(str::to_string),
        })
    }

    fn password_matches(&self, identity: &Identity, password: &str) -> bool {
        match identity.password_hash() {
            Some(hash) => match verify_password(password, hash) {
                Ok(valid) => valid,
                Err(e) => {
                    tracing::warn!("Unreadable password hash for {}: {}", identity.email(), e);
                    false
                }
            },
            None => {
                if self.allow_default_password {
                    password == DEFAULT_PASSWORD
                } else {
                    false
                }
            }
        }
    }

    /// Create a system user. No uniqueness pre-check.
    pub async fn register_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<SystemUser, AppError> {
        let password_hash = hash_password(password)?;
        let role = role.unwrap_or(DEFAULT_ADMIN_ROLE);

        let user =
            UserRepository::create_system_user(&self.db, name, email, &password_hash, role).await?;

        tracing::info!("✅ System user {} registered with role {}", user.email, user.role);
        Ok(user)
    }

    /// Register a default-role system user unless one already owns `email`.
    /// Teachers and students with the same email don't count.
    pub async fn ensure_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<SystemUser>, AppError> {
        if UserRepository::find_system_user_by_email(&self.db, email).await?.is_some() {
            tracing::debug!("Bootstrap admin {} already exists", email);
            return Ok(None);
        }

        tracing::info!("Bootstrap admin {} doesn't exist; inserting.", email);
        self.register_admin(name, email, password, None).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    const SECRET: &str = "unit-test-secret";

    async fn authenticator(allow_default_password: bool) -> Authenticator {
        Authenticator::new(test_pool().await, TokenSigner::new(SECRET), allow_default_password)
    }

    #[tokio::test]
    async fn test_system_user_login_with_hash() {
        let auth = authenticator(true).await;
        let user = auth
            .register_admin("Principal", "principal@school.test", "correct horse", None)
            .await
            .unwrap();

        let session = auth.login("principal@school.test", "correct horse").await.unwrap();
        assert_eq!(session.id, user.id.to_string());
        assert_eq!(session.role, "admin");
        assert_eq!(session.name, "Principal");

        let claims = auth.signer().verify(&session.token).unwrap();
        assert_eq!(claims.id, user.id.to_string());
        assert_eq!(claims.role, "admin");
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let auth = authenticator(true).await;
        auth.register_admin("Principal", "principal@school.test", "correct horse", None)
            .await
            .unwrap();

        let result = auth.login("principal@school.test", "battery staple").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email_is_invalid_credentials() {
        let auth = authenticator(true).await;
        for password in ["", DEFAULT_PASSWORD, "anything"] {
            let result = auth.login("ghost@school.test", password).await;
            assert!(matches!(result, Err(AppError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn test_teacher_without_hash_uses_default_password() {
        let auth = authenticator(true).await;
        let teacher = UserRepository::create_teacher(&auth.db, "Ms. Ito", "ito@school.test", None)
            .await
            .unwrap();

        let session = auth.login("ito@school.test", DEFAULT_PASSWORD).await.unwrap();
        assert_eq!(session.role, "teacher");
        assert_eq!(session.name, "Ms. Ito");
        assert_eq!(auth.signer().verify(&session.token).unwrap().id, teacher.id.to_string());

        let result = auth.login("ito@school.test", "654321").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_student_with_hash() {
        let auth = authenticator(true).await;
        let hash = hash_password("pupil-pass").unwrap();
        UserRepository::create_student(&auth.db, "Ada", "ada@school.test", Some(&hash))
            .await
            .unwrap();

        let session = auth.login("ada@school.test", "pupil-pass").await.unwrap();
        assert_eq!(session.role, "student");
        assert_eq!(session.name, "Ada");

        // A stored hash disables the fallback
        let result = auth.login("ada@school.test", DEFAULT_PASSWORD).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_default_password_can_be_disabled() {
        let auth = authenticator(false).await;
        UserRepository::create_student(&auth.db, "Ben", "ben@school.test", None)
            .await
            .unwrap();

        let result = auth.login("ben@school.test", DEFAULT_PASSWORD).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_system_user_shadows_teacher() {
        let auth = authenticator(true).await;
        let admin = auth
            .register_admin("Head", "shared@school.test", "admin-pass", Some("principal"))
            .await
            .unwrap();
        UserRepository::create_teacher(&auth.db, "Teacher Twin", "shared@school.test", None)
            .await
            .unwrap();

        let identity = auth.resolve_identity("shared@school.test").await.unwrap().unwrap();
        assert!(matches!(identity, Identity::SystemUser(_)));

        let session = auth.login("shared@school.test", "admin-pass").await.unwrap();
        assert_eq!(session.id, admin.id.to_string());
        assert_eq!(session.role, "principal");

        // The teacher row is unreachable even with its own fallback password
        let result = auth.login("shared@school.test", DEFAULT_PASSWORD).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unreadable_hash_is_rejected() {
        let auth = authenticator(true).await;
        UserRepository::create_student(&auth.db, "Cy", "cy@school.test", Some("plaintext"))
            .await
            .unwrap();

        let result = auth.login("cy@school.test", "plaintext").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_ensure_admin_ignores_teacher_with_same_email() {
        let auth = authenticator(true).await;
        UserRepository::create_teacher(&auth.db, "Mr. Root", "root@school.test", None)
            .await
            .unwrap();

        let created = auth
            .ensure_admin("Administrator", "root@school.test", "bootstrap-pass")
            .await
            .unwrap();
        assert!(created.is_some());

        let admin = UserRepository::find_system_user_by_email(&auth.db, "root@school.test")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, "admin");

        let session = auth.login("root@school.test", "bootstrap-pass").await.unwrap();
        assert_eq!(session.id, admin.id.to_string());
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let auth = authenticator(true).await;
        auth.ensure_admin("Administrator", "root@school.test", "first")
            .await
            .unwrap();

        let second = auth
            .ensure_admin("Administrator", "root@school.test", "second")
            .await
            .unwrap();
        assert!(second.is_none());

        // The original password still applies
        assert!(auth.login("root@school.test", "first").await.is_ok());
    }
}
