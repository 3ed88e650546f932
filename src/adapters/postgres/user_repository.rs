use super::invalid_data;
use crate::domain::{Email, Role, User, UserId};
use crate::ports::user_repository::{Result, UserRepository as UserRepositoryTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをUserに変換する
fn map_row_to_user(row: &PgRow) -> Result<User> {
    let email_str: &str = row.get("email");
    let email = Email::parse(email_str)
        .map_err(|e| invalid_data(format!("invalid email in users row: {:?}", e)))?;
    let is_librarian: bool = row.get("is_librarian");

    Ok(User {
        user_id: UserId::from_uuid(row.get("user_id")),
        email,
        password_hash: row.get("password_hash"),
        role: Role::from_flag(is_librarian),
        created_at: row.get("created_at"),
    })
}

/// UserRepositoryのPostgreSQL実装
///
/// メールアドレスの一意性は lower(email) のユニークインデックスで保証する。
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                is_librarian,
                created_at
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_user).transpose()
    }

    async fn insert(&self, user: User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                is_librarian,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id.value())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.is_librarian())
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
