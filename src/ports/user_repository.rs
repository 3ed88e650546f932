use crate::domain::{Email, User};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 利用者リポジトリポート
///
/// 認証情報ストアの永続化部分。パスワードの検証は行わず、
/// ハッシュ済みの値を保存・取得するだけ。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// メールアドレスで利用者を検索する
    ///
    /// 大文字小文字を区別しない。
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>>;

    /// 利用者を保存する
    async fn insert(&self, user: User) -> Result<()>;
}
