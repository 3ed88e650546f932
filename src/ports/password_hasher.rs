pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// パスワードハッシュポート
///
/// 一方向ハッシュのみを扱う。平文は保存も比較もしない。
pub trait PasswordHasher: Send + Sync {
    /// パスワードをハッシュ化する
    fn hash(&self, password: &str) -> Result<String>;

    /// パスワードが保存済みハッシュと一致するか検証する
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool>;
}
