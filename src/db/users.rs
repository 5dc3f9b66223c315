use sqlx::{Pool, Sqlite};

use crate::db::models::{Student, SystemUser, Teacher};
use crate::error::AppError;

pub struct UserRepository;

impl UserRepository {
    pub async fn find_system_user_by_email(
        pool: &Pool<Sqlite>,
        email: &str,
    ) -> Result<Option<SystemUser>, AppError> {
        let user = sqlx::query_as::<_, SystemUser>(
            "SELECT id, name, email, password, role, image FROM system_users WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_teacher_by_email(
        pool: &Pool<Sqlite>,
        email: &str,
    ) -> Result<Option<Teacher>, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT id, teacher_name, email, password, image FROM teachers WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(teacher)
    }

    pub async fn find_student_by_email(
        pool: &Pool<Sqlite>,
        email: &str,
    ) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, student_name, email, password, image FROM students WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(student)
    }

    /// Insert a system user. Duplicate emails are left to the UNIQUE constraint.
    pub async fn create_system_user(
        pool: &Pool<Sqlite>,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<SystemUser, AppError> {
        let user = sqlx::query_as::<_, SystemUser>(
            r#"
INSERT INTO system_users (name, email, password, role)
VALUES (?, ?, ?, ?)
RETURNING id, name, email, password, role, image
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn create_teacher(
        pool: &Pool<Sqlite>,
        teacher_name: &str,
        email: &str,
        password_hash: Option<&str>,
    ) -> Result<Teacher, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
INSERT INTO teachers (teacher_name, email, password)
VALUES (?, ?, ?)
RETURNING id, teacher_name, email, password, image
            "#,
        )
        .bind(teacher_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        Ok(teacher)
    }

    pub async fn create_student(
        pool: &Pool<Sqlite>,
        student_name: &str,
        email: &str,
        password_hash: Option<&str>,
    ) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
INSERT INTO students (student_name, email, password)
VALUES (?, ?, ?)
RETURNING id, student_name, email, password, image
            "#,
        )
        .bind(student_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        Ok(student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_lookup_per_table() {
        let pool = test_pool().await;
        UserRepository::create_teacher(&pool, "Ms. Rahman", "rahman@school.test", None)
            .await
            .unwrap();

        let teacher = UserRepository::find_teacher_by_email(&pool, "rahman@school.test")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(teacher.teacher_name, "Ms. Rahman");
        assert!(teacher.password.is_none());

        assert!(UserRepository::find_system_user_by_email(&pool, "rahman@school.test")
            .await
            .unwrap()
            .is_none());
        assert!(UserRepository::find_student_by_email(&pool, "rahman@school.test")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_system_user_rejected_by_store() {
        let pool = test_pool().await;
        UserRepository::create_system_user(&pool, "Root", "root@school.test", "hash", "admin")
            .await
            .unwrap();

        let second =
            UserRepository::create_system_user(&pool, "Root 2", "root@school.test", "hash", "admin")
                .await;
        assert!(matches!(second, Err(AppError::Database(_))));
    }
}
