use thiserror::Error;

/// エラーの分類
///
/// API層はこの分類だけを見てステータスコードを決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    AlreadyExists,
    Unauthorized,
    Forbidden,
    NotFound,
    AlreadyReturned,
    Conflict,
    NotAvailable,
    Internal,
}

/// 貸出管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LendingApplicationError {
    /// 必須項目の欠落
    #[error("{0}")]
    InvalidInput(&'static str),

    /// 日付形式の誤り
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDateFormat,

    /// メールアドレスが登録済み
    #[error("User with this email already exists.")]
    UserAlreadyExists,

    /// タイトルが登録済み
    #[error("Book with this title already exists.")]
    BookAlreadyExists,

    /// 認証失敗（利用者が存在しない、またはパスワード不一致）
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// 司書権限がない
    #[error("{0}")]
    Forbidden(&'static str),

    /// 書籍が存在しない
    #[error("Book not found.")]
    BookNotFound,

    /// 貸出申請が存在しない
    #[error("Borrow request not found.")]
    BorrowRequestNotFound,

    /// 申請に紐づく書籍が存在しない
    #[error("Book associated with this request not found.")]
    ReturnedBookMissing,

    /// 既に返却済み
    #[error("This book is already marked as returned.")]
    AlreadyReturned,

    /// 承認済みの申請と期間が重なる
    #[error("Book is not available for the requested period.")]
    BookUnavailable,

    /// 貸出履歴が空
    #[error("Borrow history not available for this user.")]
    BorrowHistoryEmpty,

    /// UserRepositoryのエラー
    #[error("User repository error")]
    UserRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BookRepositoryのエラー
    #[error("Book repository error")]
    BookRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BorrowLedgerのエラー
    #[error("Borrow ledger error")]
    BorrowLedgerError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// PasswordHasherのエラー
    #[error("Password hasher error")]
    PasswordHasherError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LendingApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) | Self::InvalidDateFormat => ErrorKind::InvalidInput,
            Self::UserAlreadyExists | Self::BookAlreadyExists => ErrorKind::AlreadyExists,
            Self::InvalidCredentials => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::BookNotFound | Self::BorrowRequestNotFound | Self::ReturnedBookMissing => {
                ErrorKind::NotFound
            }
            Self::AlreadyReturned => ErrorKind::AlreadyReturned,
            Self::BookUnavailable => ErrorKind::Conflict,
            Self::BorrowHistoryEmpty => ErrorKind::NotAvailable,
            Self::UserRepositoryError(_)
            | Self::BookRepositoryError(_)
            | Self::BorrowLedgerError(_)
            | Self::PasswordHasherError(_) => ErrorKind::Internal,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LendingApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_error_is_classified_as_invalid_input() {
        let err = LendingApplicationError::InvalidDateFormat;
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "Invalid date format. Use YYYY-MM-DD.");
    }

    #[test]
    fn test_storage_errors_are_internal() {
        let err = LendingApplicationError::BorrowLedgerError("connection reset".into());
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
