use super::invalid_data;
use crate::domain::{BookId, BorrowRequest, BorrowRequestId, BorrowStatus, DateRange, UserId};
use crate::ports::borrow_ledger::{
    AdmissionOutcome, BorrowLedger as BorrowLedgerTrait, Result, ReturnOutcome,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// PostgreSQLの行データをBorrowRequestに変換する
fn map_row_to_borrow_request(row: &PgRow) -> Result<BorrowRequest> {
    let status_str: &str = row.get("status");
    let status = BorrowStatus::from_str(status_str).map_err(invalid_data)?;

    Ok(BorrowRequest {
        request_id: BorrowRequestId::from_uuid(row.get("request_id")),
        user_id: UserId::from_uuid(row.get("user_id")),
        book_id: BookId::from_uuid(row.get("book_id")),
        period: DateRange::new(row.get("start_date"), row.get("end_date")),
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// BorrowLedgerのPostgreSQL実装
///
/// 記録系の操作は1つのトランザクションで申請と書籍の両方を更新する。
pub struct BorrowLedger {
    pool: PgPool,
}

impl BorrowLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowLedgerTrait for BorrowLedger {
    /// (book_id, status)のインデックスを使用する
    async fn find_approved_for_book(&self, book_id: BookId) -> Result<Vec<BorrowRequest>> {
        let rows = sqlx::query(
            r#"
            SELECT
                request_id,
                user_id,
                book_id,
                start_date,
                end_date,
                status,
                created_at,
                updated_at
            FROM borrow_requests
            WHERE book_id = $1 AND status = 'Approved'
            ORDER BY start_date ASC
            "#,
        )
        .bind(book_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_borrow_request).collect()
    }

    async fn get_by_id(&self, request_id: BorrowRequestId) -> Result<Option<BorrowRequest>> {
        let row = sqlx::query(
            r#"
            SELECT
                request_id,
                user_id,
                book_id,
                start_date,
                end_date,
                status,
                created_at,
                updated_at
            FROM borrow_requests
            WHERE request_id = $1
            "#,
        )
        .bind(request_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_borrow_request).transpose()
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<BorrowRequest>> {
        let rows = sqlx::query(
            r#"
            SELECT
                request_id,
                user_id,
                book_id,
                start_date,
                end_date,
                status,
                created_at,
                updated_at
            FROM borrow_requests
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_borrow_request).collect()
    }

    /// 承認済み申請を記録する
    ///
    /// 書籍の行を FOR UPDATE でロックしてから重なりを再判定するため、
    /// 同じ書籍への並行した申請はここで直列化される。
    async fn record_approved(&self, request: BorrowRequest) -> Result<AdmissionOutcome> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<uuid::Uuid> = sqlx::query_scalar(
            r#"
            SELECT book_id FROM books WHERE book_id = $1 FOR UPDATE
            "#,
        )
        .bind(request.book_id.value())
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Err(invalid_data(format!(
                "book not found: {}",
                request.book_id.value()
            )));
        }

        // [s1,e1] と [s2,e2] は s1 <= e2 かつ e1 >= s2 のとき重なる
        let overlapping: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM borrow_requests
                WHERE book_id = $1
                  AND status = 'Approved'
                  AND start_date <= $3
                  AND end_date >= $2
            )
            "#,
        )
        .bind(request.book_id.value())
        .bind(request.period.start)
        .bind(request.period.end)
        .fetch_one(&mut *tx)
        .await?;

        if overlapping {
            tx.rollback().await?;
            return Ok(AdmissionOutcome::Conflicted);
        }

        sqlx::query(
            r#"
            INSERT INTO borrow_requests (
                request_id,
                user_id,
                book_id,
                start_date,
                end_date,
                status,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(request.request_id.value())
        .bind(request.user_id.value())
        .bind(request.book_id.value())
        .bind(request.period.start)
        .bind(request.period.end)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE books SET available = FALSE, updated_at = $2 WHERE book_id = $1
            "#,
        )
        .bind(request.book_id.value())
        .bind(request.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(AdmissionOutcome::Admitted)
    }

    async fn record_returned(&self, request: BorrowRequest) -> Result<ReturnOutcome> {
        let mut tx = self.pool.begin().await?;

        // 承認済みの行だけを更新し、並行した返却との二重記録を防ぐ
        let updated = sqlx::query(
            r#"
            UPDATE borrow_requests
            SET status = $2, updated_at = $3
            WHERE request_id = $1 AND status = 'Approved'
            "#,
        )
        .bind(request.request_id.value())
        .bind(request.status.as_str())
        .bind(request.updated_at)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            let exists: bool = sqlx::query_scalar(
                r#"
                SELECT EXISTS (SELECT 1 FROM borrow_requests WHERE request_id = $1)
                "#,
            )
            .bind(request.request_id.value())
            .fetch_one(&mut *tx)
            .await?;

            tx.rollback().await?;

            if exists {
                return Ok(ReturnOutcome::AlreadyReturned);
            }
            return Err(invalid_data(format!(
                "borrow request not found: {}",
                request.request_id.value()
            )));
        }

        sqlx::query(
            r#"
            UPDATE books SET available = TRUE, updated_at = $2 WHERE book_id = $1
            "#,
        )
        .bind(request.book_id.value())
        .bind(request.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ReturnOutcome::Returned)
    }
}
