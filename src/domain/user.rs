use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Email, UserId};

/// 利用者の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// 司書（蔵書登録・返却処理が可能）
    Librarian,
    /// 一般利用者
    Member,
}

impl Role {
    pub fn from_flag(is_librarian: bool) -> Self {
        if is_librarian {
            Role::Librarian
        } else {
            Role::Member
        }
    }
}

/// 利用者 - 登録後は不変
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    /// argon2 の PHC 文字列
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_librarian(&self) -> bool {
        self.role == Role::Librarian
    }
}

/// 純粋関数：利用者を登録する
///
/// パスワードはハッシュ化済みの値を受け取る。平文はドメインに入らない。
pub fn register_user(
    email: Email,
    password_hash: String,
    role: Role,
    registered_at: DateTime<Utc>,
) -> User {
    User {
        user_id: UserId::new(),
        email,
        password_hash,
        role,
        created_at: registered_at,
    }
}
