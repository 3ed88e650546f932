use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AdmissionError, BookId, BorrowRequestId, DateRange, ReturnBookError, UserId};

/// 貸出申請のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorrowStatus {
    /// 承認済み（貸出中・予約中）
    Approved,
    /// 返却済み
    Returned,
}

impl BorrowStatus {
    /// 文字列表現を取得する（APIと永続化で共通）
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Approved => "Approved",
            BorrowStatus::Returned => "Returned",
        }
    }

    pub fn is_returned(&self) -> bool {
        matches!(self, BorrowStatus::Returned)
    }
}

impl std::str::FromStr for BorrowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approved" => Ok(BorrowStatus::Approved),
            "Returned" => Ok(BorrowStatus::Returned),
            _ => Err(format!("Invalid borrow status: {}", s)),
        }
    }
}

/// 貸出申請集約 - 1冊の書籍に対する1つの期間の申請
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRequest {
    pub request_id: BorrowRequestId,

    // 他の集約への参照（IDのみ）
    pub user_id: UserId,
    pub book_id: BookId,

    pub period: DateRange,
    pub status: BorrowStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 純粋関数：受付判定
///
/// 同じ書籍の承認済み申請のうち、期間が重なるものが1件でもあれば拒否する。
/// 返却済みの申請と他の書籍の申請は判定に含めない。
pub fn check_admission(
    existing: &[BorrowRequest],
    book_id: BookId,
    period: &DateRange,
) -> Result<(), AdmissionError> {
    let conflicting = existing.iter().find(|request| {
        request.book_id == book_id
            && request.status == BorrowStatus::Approved
            && request.period.overlaps(period)
    });

    match conflicting {
        Some(request) => Err(AdmissionError::Overlaps {
            conflicting: request.request_id,
        }),
        None => Ok(()),
    }
}

/// 純粋関数：貸出を申請する
///
/// ビジネスルール：
/// - 承認済みの申請と期間が重なる場合は拒否
/// - 受け付けた申請は即座にApproved
///
/// 副作用なし。書籍の貸出可否フラグの更新は台帳への記録時に行う。
pub fn submit_borrow_request(
    user_id: UserId,
    book_id: BookId,
    period: DateRange,
    existing: &[BorrowRequest],
    submitted_at: DateTime<Utc>,
) -> Result<BorrowRequest, AdmissionError> {
    check_admission(existing, book_id, &period)?;

    Ok(BorrowRequest {
        request_id: BorrowRequestId::new(),
        user_id,
        book_id,
        period,
        status: BorrowStatus::Approved,
        created_at: submitted_at,
        updated_at: submitted_at,
    })
}

/// 純粋関数：返却済みにする
///
/// ステータスの遷移は Approved -> Returned の1回のみ。
pub fn return_borrow_request(
    request: &BorrowRequest,
    returned_at: DateTime<Utc>,
) -> Result<BorrowRequest, ReturnBookError> {
    if request.status.is_returned() {
        return Err(ReturnBookError::AlreadyReturned);
    }

    Ok(BorrowRequest {
        status: BorrowStatus::Returned,
        updated_at: returned_at,
        ..request.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::parse(start, end).unwrap()
    }

    fn approved(book_id: BookId, start: &str, end: &str) -> BorrowRequest {
        submit_borrow_request(UserId::new(), book_id, range(start, end), &[], Utc::now()).unwrap()
    }

    #[test]
    fn test_submit_creates_approved_request() {
        let user_id = UserId::new();
        let book_id = BookId::new();
        let now = Utc::now();

        let request = submit_borrow_request(
            user_id,
            book_id,
            range("2024-01-01", "2024-01-10"),
            &[],
            now,
        )
        .unwrap();

        assert_eq!(request.user_id, user_id);
        assert_eq!(request.book_id, book_id);
        assert_eq!(request.status, BorrowStatus::Approved);
        assert_eq!(request.created_at, now);
    }

    #[test]
    fn test_submit_rejects_shared_boundary_day() {
        let book_id = BookId::new();
        let a = approved(book_id, "2024-01-01", "2024-01-10");

        let result = submit_borrow_request(
            UserId::new(),
            book_id,
            range("2024-01-10", "2024-01-20"),
            std::slice::from_ref(&a),
            Utc::now(),
        );

        assert_eq!(
            result.unwrap_err(),
            AdmissionError::Overlaps {
                conflicting: a.request_id
            }
        );
    }

    #[test]
    fn test_submit_accepts_adjacent_range() {
        let book_id = BookId::new();
        let a = approved(book_id, "2024-01-01", "2024-01-10");

        let result = submit_borrow_request(
            UserId::new(),
            book_id,
            range("2024-01-11", "2024-01-20"),
            &[a],
            Utc::now(),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_returned_request_does_not_block() {
        let book_id = BookId::new();
        let a = approved(book_id, "2024-01-01", "2024-01-10");
        let returned = return_borrow_request(&a, Utc::now()).unwrap();

        let result = check_admission(&[returned], book_id, &range("2024-01-05", "2024-01-06"));

        assert!(result.is_ok());
    }

    #[test]
    fn test_other_book_does_not_block() {
        let a = approved(BookId::new(), "2024-01-01", "2024-01-10");

        let result = check_admission(&[a], BookId::new(), &range("2024-01-01", "2024-01-10"));

        assert!(result.is_ok());
    }

    #[test]
    fn test_submit_accepts_inverted_range() {
        let result = submit_borrow_request(
            UserId::new(),
            BookId::new(),
            range("2024-01-20", "2024-01-01"),
            &[],
            Utc::now(),
        );

        assert!(result.is_ok());
        assert!(result.unwrap().period.is_inverted());
    }

    #[test]
    fn test_return_marks_returned() {
        let a = approved(BookId::new(), "2024-01-01", "2024-01-10");
        let returned_at = Utc::now();

        let returned = return_borrow_request(&a, returned_at).unwrap();

        assert_eq!(returned.status, BorrowStatus::Returned);
        assert_eq!(returned.updated_at, returned_at);
        assert_eq!(returned.request_id, a.request_id);
        assert_eq!(returned.period, a.period);
    }

    #[test]
    fn test_return_fails_when_already_returned() {
        let a = approved(BookId::new(), "2024-01-01", "2024-01-10");
        let returned = return_borrow_request(&a, Utc::now()).unwrap();

        let result = return_borrow_request(&returned, Utc::now());

        assert_eq!(result.unwrap_err(), ReturnBookError::AlreadyReturned);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        assert_eq!("Approved".parse::<BorrowStatus>(), Ok(BorrowStatus::Approved));
        assert_eq!("Returned".parse::<BorrowStatus>(), Ok(BorrowStatus::Returned));
        assert!("approved".parse::<BorrowStatus>().is_err());
    }
}
