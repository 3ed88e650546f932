use crate::domain::{
    self, BorrowRequest, BorrowRequestId, DateRange, User,
    commands::{ReturnBook, SubmitBorrowRequest},
};
use crate::ports::{AdmissionOutcome, ReturnOutcome};

use super::credentials::ensure_librarian;
use super::dependencies::ServiceDependencies;
use super::errors::{LendingApplicationError, Result};

/// 貸出を申請する（受付判定）
///
/// ビジネスルール：
/// - 書籍ID・開始日・終了日は必須
/// - 日付は YYYY-MM-DD
/// - 同じ書籍の承認済み申請と期間が1日でも重なれば拒否
/// - 受け付けた申請は即座に承認され、書籍は貸出不可になる
///
/// 開始日 <= 終了日 は検証しない（逆転した期間は警告ログのみ）。
///
/// # 一貫性保証
///
/// ここでの判定の後、台帳は記録と同じ単位で重なりを再判定する。
/// 並行した申請が先に記録された場合は`BookUnavailable`になる。
pub async fn submit_borrow_request(
    deps: &ServiceDependencies,
    user: &User,
    cmd: SubmitBorrowRequest,
) -> Result<BorrowRequestId> {
    // 1. 入力検証
    let book_id = match cmd.book_id {
        Some(book_id) if !cmd.start_date.is_empty() && !cmd.end_date.is_empty() => book_id,
        _ => return Err(LendingApplicationError::InvalidInput("All fields are required.")),
    };

    let period = DateRange::parse(&cmd.start_date, &cmd.end_date)
        .map_err(|_| LendingApplicationError::InvalidDateFormat)?;

    if period.is_inverted() {
        tracing::warn!(
            book_id = %book_id.value(),
            start = %period.start,
            end = %period.end,
            "borrow request with start date after end date accepted"
        );
    }

    // 2. 書籍の存在確認
    let book = deps
        .books
        .get_by_id(book_id)
        .await
        .map_err(LendingApplicationError::BookRepositoryError)?
        .ok_or(LendingApplicationError::BookNotFound)?;

    // 3. 承認済み申請との重なり判定
    let approved = deps
        .borrow_ledger
        .find_approved_for_book(book.book_id)
        .await
        .map_err(LendingApplicationError::BorrowLedgerError)?;

    let request = domain::borrow_request::submit_borrow_request(
        user.user_id,
        book.book_id,
        period,
        &approved,
        chrono::Utc::now(),
    )
    .map_err(|e| {
        tracing::debug!(book_id = %book.book_id.value(), reason = ?e, "borrow request rejected");
        LendingApplicationError::BookUnavailable
    })?;

    let request_id = request.request_id;

    // 4. 台帳に記録（書籍の貸出可否も更新される）
    let outcome = deps
        .borrow_ledger
        .record_approved(request)
        .await
        .map_err(LendingApplicationError::BorrowLedgerError)?;

    match outcome {
        AdmissionOutcome::Admitted => {
            tracing::info!(
                request_id = %request_id.value(),
                book_id = %book.book_id.value(),
                user_id = %user.user_id.value(),
                "borrow request approved"
            );
            Ok(request_id)
        }
        AdmissionOutcome::Conflicted => {
            tracing::warn!(
                book_id = %book.book_id.value(),
                "borrow request lost a concurrent admission race"
            );
            Err(LendingApplicationError::BookUnavailable)
        }
    }
}

/// 返却を記録できる利用者か確認する
///
/// 申請IDの形式や存在より先に判定する。
pub fn authorize_return_book(user: &User) -> Result<()> {
    ensure_librarian(user, "Only librarians can mark books as returned.")
}

/// 書籍を返却済みにする
///
/// ビジネスルール：
/// - 司書のみ（申請の存在より先に判定する）
/// - 申請が存在すること
/// - 既に返却済みでないこと
/// - 返却時は他の承認済み申請に関係なく書籍を貸出可能に戻す
pub async fn return_book(deps: &ServiceDependencies, user: &User, cmd: ReturnBook) -> Result<()> {
    // 1. 権限確認
    authorize_return_book(user)?;

    // 2. 申請の取得
    let request = deps
        .borrow_ledger
        .get_by_id(cmd.request_id)
        .await
        .map_err(LendingApplicationError::BorrowLedgerError)?
        .ok_or(LendingApplicationError::BorrowRequestNotFound)?;

    // 3. ドメイン層の純粋関数を呼び出し
    let returned = domain::borrow_request::return_borrow_request(&request, chrono::Utc::now())
        .map_err(|_| LendingApplicationError::AlreadyReturned)?;

    // 4. 書籍の存在確認
    deps.books
        .get_by_id(request.book_id)
        .await
        .map_err(LendingApplicationError::BookRepositoryError)?
        .ok_or(LendingApplicationError::ReturnedBookMissing)?;

    // 5. 台帳に記録（並行した返却が先に記録されていれば返却済み扱い）
    let outcome = deps
        .borrow_ledger
        .record_returned(returned)
        .await
        .map_err(LendingApplicationError::BorrowLedgerError)?;

    if outcome == ReturnOutcome::AlreadyReturned {
        return Err(LendingApplicationError::AlreadyReturned);
    }

    tracing::info!(
        request_id = %cmd.request_id.value(),
        book_id = %request.book_id.value(),
        "book marked as returned"
    );

    Ok(())
}

/// 利用者自身の貸出履歴を取得する
///
/// 履歴が1件もない場合は空のリストではなく`BorrowHistoryEmpty`を返す。
pub async fn borrow_history(deps: &ServiceDependencies, user: &User) -> Result<Vec<BorrowRequest>> {
    let history = deps
        .borrow_ledger
        .find_by_user(user.user_id)
        .await
        .map_err(LendingApplicationError::BorrowLedgerError)?;

    if history.is_empty() {
        return Err(LendingApplicationError::BorrowHistoryEmpty);
    }

    Ok(history)
}
