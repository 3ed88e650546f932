use super::MemoryStore;
use crate::domain::{BookId, BorrowRequest, BorrowRequestId, BorrowStatus, UserId, borrow_request};
use crate::ports::borrow_ledger::{AdmissionOutcome, BorrowLedger, Result, ReturnOutcome};
use async_trait::async_trait;

#[async_trait]
impl BorrowLedger for MemoryStore {
    async fn find_approved_for_book(&self, book_id: BookId) -> Result<Vec<BorrowRequest>> {
        let state = self.lock()?;
        Ok(state
            .borrow_requests
            .iter()
            .filter(|r| r.book_id == book_id && r.status == BorrowStatus::Approved)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, request_id: BorrowRequestId) -> Result<Option<BorrowRequest>> {
        let state = self.lock()?;
        Ok(state
            .borrow_requests
            .iter()
            .find(|r| r.request_id == request_id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<BorrowRequest>> {
        let state = self.lock()?;
        Ok(state
            .borrow_requests
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    /// Re-runs the admission check under the store lock before inserting
    async fn record_approved(&self, request: BorrowRequest) -> Result<AdmissionOutcome> {
        let mut state = self.lock()?;

        if borrow_request::check_admission(&state.borrow_requests, request.book_id, &request.period)
            .is_err()
        {
            return Ok(AdmissionOutcome::Conflicted);
        }

        let book = state
            .books
            .iter_mut()
            .find(|b| b.book_id == request.book_id)
            .ok_or_else(|| format!("book not found: {}", request.book_id.value()))?;
        book.available = false;
        book.updated_at = request.created_at;

        state.borrow_requests.push(request);
        Ok(AdmissionOutcome::Admitted)
    }

    /// Re-checks the stored status under the store lock before writing
    async fn record_returned(&self, request: BorrowRequest) -> Result<ReturnOutcome> {
        let mut state = self.lock()?;

        let stored_index = state
            .borrow_requests
            .iter()
            .position(|r| r.request_id == request.request_id)
            .ok_or_else(|| format!("borrow request not found: {}", request.request_id.value()))?;

        if state.borrow_requests[stored_index].status.is_returned() {
            return Ok(ReturnOutcome::AlreadyReturned);
        }

        let book = state
            .books
            .iter_mut()
            .find(|b| b.book_id == request.book_id)
            .ok_or_else(|| format!("book not found: {}", request.book_id.value()))?;
        book.available = true;
        book.updated_at = request.updated_at;

        state.borrow_requests[stored_index] = request;
        Ok(ReturnOutcome::Returned)
    }
}
