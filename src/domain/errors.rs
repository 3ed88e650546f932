use super::BorrowRequestId;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// 必須項目が空
    Empty(&'static str),
    /// YYYY-MM-DD として解析できない日付
    InvalidDate(String),
}

/// 貸出申請の受付エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// 承認済みの申請と期間が重なる
    Overlaps { conflicting: BorrowRequestId },
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 既に返却済み
    AlreadyReturned,
}
