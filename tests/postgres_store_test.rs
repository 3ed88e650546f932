//! PostgreSQLアダプターのテスト
//!
//! 実行にはPostgreSQLが必要なため `#[ignore]` にしている。
//! `DATABASE_URL=... cargo test -- --ignored` で実行する。

use chrono::Utc;
use library_lending::adapters::postgres::{
    PostgresBookRepository, PostgresBorrowLedger, PostgresUserRepository,
};
use library_lending::domain::{self, *};
use library_lending::ports::*;
use serial_test::serial;
use sqlx::PgPool;

mod common;

/// データベースのクリーンアップ
///
/// テストの独立性を保つため、各テスト前にすべてのデータを削除します。
async fn cleanup_database(pool: &PgPool) {
    sqlx::query("TRUNCATE TABLE borrow_requests, books, users CASCADE")
        .execute(pool)
        .await
        .expect("Failed to truncate tables");
}

async fn setup() -> (
    PostgresUserRepository,
    PostgresBookRepository,
    PostgresBorrowLedger,
    User,
    Book,
) {
    let pool = common::create_test_pool().await;
    cleanup_database(&pool).await;

    let users = PostgresUserRepository::new(pool.clone());
    let books = PostgresBookRepository::new(pool.clone());
    let ledger = PostgresBorrowLedger::new(pool);

    let user = domain::user::register_user(
        Email::parse("Reader@Example.com").unwrap(),
        "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        Role::Member,
        Utc::now(),
    );
    users.insert(user.clone()).await.unwrap();

    let book = domain::book::add_book(
        BookTitle::parse("Dune").unwrap(),
        "Frank Herbert".to_string(),
        Utc::now(),
    );
    books.insert(book.clone()).await.unwrap();

    (users, books, ledger, user, book)
}

fn request(user: &User, book: &Book, start: &str, end: &str) -> BorrowRequest {
    domain::borrow_request::submit_borrow_request(
        user.user_id,
        book.book_id,
        DateRange::parse(start, end).unwrap(),
        &[],
        Utc::now(),
    )
    .unwrap()
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_user_by_email_ignores_case() {
    let (users, _, _, user, _) = setup().await;

    let found = users
        .find_by_email(&Email::parse("READER@example.com").unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.user_id, user.user_id);
    assert_eq!(found.email.as_str(), "Reader@Example.com");
    assert_eq!(found.role, Role::Member);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_email_is_rejected_by_unique_index() {
    let (users, _, _, _, _) = setup().await;

    let duplicate = domain::user::register_user(
        Email::parse("reader@example.COM").unwrap(),
        "hash".to_string(),
        Role::Librarian,
        Utc::now(),
    );

    assert!(users.insert(duplicate).await.is_err());
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_book_by_title_ignores_case() {
    let (_, books, _, _, book) = setup().await;

    let found = books
        .find_by_title(&BookTitle::parse("dune").unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.book_id, book.book_id);
    assert!(found.available);
    assert_eq!(books.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_record_approved_flips_availability() {
    let (_, books, ledger, user, book) = setup().await;
    let approved = request(&user, &book, "2024-01-01", "2024-01-10");

    let outcome = ledger.record_approved(approved.clone()).await.unwrap();

    assert_eq!(outcome, AdmissionOutcome::Admitted);
    let stored = books.get_by_id(book.book_id).await.unwrap().unwrap();
    assert!(!stored.available);
    let loaded = ledger.get_by_id(approved.request_id).await.unwrap().unwrap();
    assert_eq!(loaded.period, approved.period);
    assert_eq!(loaded.status, BorrowStatus::Approved);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_record_approved_rechecks_overlap() {
    let (_, _, ledger, user, book) = setup().await;
    ledger
        .record_approved(request(&user, &book, "2024-01-01", "2024-01-10"))
        .await
        .unwrap();

    // 受付判定を経ずに記録しようとしても、台帳が重なりを検出する
    let racing = request(&user, &book, "2024-01-10", "2024-01-20");
    let outcome = ledger.record_approved(racing.clone()).await.unwrap();

    assert_eq!(outcome, AdmissionOutcome::Conflicted);
    assert!(ledger.get_by_id(racing.request_id).await.unwrap().is_none());
    assert_eq!(
        ledger
            .find_approved_for_book(book.book_id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_record_returned_restores_availability() {
    let (_, books, ledger, user, book) = setup().await;
    let approved = request(&user, &book, "2024-01-01", "2024-01-10");
    ledger.record_approved(approved.clone()).await.unwrap();

    let returned = domain::borrow_request::return_borrow_request(&approved, Utc::now()).unwrap();
    let outcome = ledger.record_returned(returned).await.unwrap();

    assert_eq!(outcome, ReturnOutcome::Returned);

    let stored = books.get_by_id(book.book_id).await.unwrap().unwrap();
    assert!(stored.available);
    assert!(
        ledger
            .find_approved_for_book(book.book_id)
            .await
            .unwrap()
            .is_empty()
    );
    let history = ledger.find_by_user(user.user_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, BorrowStatus::Returned);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_record_returned_twice_reports_already_returned() {
    let (_, _, ledger, user, book) = setup().await;
    let approved = request(&user, &book, "2024-01-01", "2024-01-10");
    ledger.record_approved(approved.clone()).await.unwrap();

    let returned = domain::borrow_request::return_borrow_request(&approved, Utc::now()).unwrap();
    ledger.record_returned(returned.clone()).await.unwrap();
    let second = ledger.record_returned(returned).await.unwrap();

    assert_eq!(second, ReturnOutcome::AlreadyReturned);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_non_ascii_email_is_found_by_its_stored_spelling() {
    let (users, _, _, _, _) = setup().await;
    let user = domain::user::register_user(
        Email::parse("ÉLODIE@Example.com").unwrap(),
        "hash".to_string(),
        Role::Member,
        Utc::now(),
    );
    users.insert(user.clone()).await.unwrap();

    // 大文字小文字の変換はデータベース側の lower() に揃える
    let found = users
        .find_by_email(&Email::parse("ÉLODIE@example.COM").unwrap())
        .await
        .unwrap();

    assert_eq!(found.map(|u| u.user_id), Some(user.user_id));
}
