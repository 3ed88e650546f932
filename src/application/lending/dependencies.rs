use crate::ports::*;
use std::sync::Arc;

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、各ユースケース関数に明示的に渡す。
/// テストではインメモリ実装を差し込む。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub users: Arc<dyn UserRepository>,
    pub books: Arc<dyn BookRepository>,
    pub borrow_ledger: Arc<dyn BorrowLedger>,
    pub password_hasher: Arc<dyn PasswordHasher>,
}
