use crate::domain::{BookId, BorrowRequest, BorrowRequestId, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 承認記録の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// 記録し、書籍を貸出不可にした
    Admitted,
    /// 記録直前の再判定で重なりが見つかった（何も書き込んでいない）
    Conflicted,
}

/// 返却記録の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// 返却済みにし、書籍を貸出可能に戻した
    Returned,
    /// 保存済みの申請が既に返却済みだった（何も書き込んでいない）
    AlreadyReturned,
}

/// 貸出台帳ポート
///
/// 貸出申請の記録と、それに伴う書籍の貸出可否フラグの更新を担う。
/// 申請の記録とフラグの更新は1つの単位でコミットされる。
#[async_trait]
pub trait BorrowLedger: Send + Sync {
    /// 書籍の承認済み申請を取得する
    ///
    /// 受付判定の入力に使用される。
    async fn find_approved_for_book(&self, book_id: BookId) -> Result<Vec<BorrowRequest>>;

    /// IDで申請を取得する
    async fn get_by_id(&self, request_id: BorrowRequestId) -> Result<Option<BorrowRequest>>;

    /// 利用者の全申請を古い順で取得する
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<BorrowRequest>>;

    /// 承認済みの申請を記録し、書籍を貸出不可にする
    ///
    /// 実装は書き込みと同じ単位の中で重なりを再判定しなければならない。
    /// 重なりがあれば何も書き込まずに`AdmissionOutcome::Conflicted`を返す。
    async fn record_approved(&self, request: BorrowRequest) -> Result<AdmissionOutcome>;

    /// 返却済みの申請を保存し、書籍を貸出可能に戻す
    ///
    /// 保存済みの申請が承認済みのときだけ書き込む。
    /// 並行した返却が先に記録されていれば`ReturnOutcome::AlreadyReturned`を返す。
    async fn record_returned(&self, request: BorrowRequest) -> Result<ReturnOutcome>;
}
