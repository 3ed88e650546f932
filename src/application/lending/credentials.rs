use crate::domain::{self, Email, Role, User, UserId, commands::RegisterUser};

use super::dependencies::ServiceDependencies;
use super::errors::{LendingApplicationError, Result};

/// 利用者を登録する
///
/// ビジネスルール：
/// - メールアドレスとパスワードは必須
/// - メールアドレスは大文字小文字を区別せずに一意
/// - パスワードはハッシュ化してから保存する
pub async fn register_user(deps: &ServiceDependencies, cmd: RegisterUser) -> Result<UserId> {
    // 1. 入力検証
    if cmd.password.is_empty() {
        return Err(LendingApplicationError::InvalidInput(
            "Email and password are required.",
        ));
    }
    let email = Email::parse(&cmd.email).map_err(|_| {
        LendingApplicationError::InvalidInput("Email and password are required.")
    })?;

    // 2. 重複確認
    let existing = deps
        .users
        .find_by_email(&email)
        .await
        .map_err(LendingApplicationError::UserRepositoryError)?;

    if existing.is_some() {
        return Err(LendingApplicationError::UserAlreadyExists);
    }

    // 3. ハッシュ化して保存
    let password_hash = deps
        .password_hasher
        .hash(&cmd.password)
        .map_err(LendingApplicationError::PasswordHasherError)?;

    let user = domain::user::register_user(
        email,
        password_hash,
        Role::from_flag(cmd.is_librarian),
        chrono::Utc::now(),
    );
    let user_id = user.user_id;

    deps.users
        .insert(user)
        .await
        .map_err(LendingApplicationError::UserRepositoryError)?;

    tracing::info!(user_id = %user_id.value(), librarian = cmd.is_librarian, "user registered");

    Ok(user_id)
}

/// 認証情報を検証して利用者を返す
///
/// 利用者が存在しない場合とパスワードが一致しない場合は区別しない。
pub async fn authenticate(deps: &ServiceDependencies, email: &str, password: &str) -> Result<User> {
    let email = Email::parse(email).map_err(|_| LendingApplicationError::InvalidCredentials)?;

    let user = deps
        .users
        .find_by_email(&email)
        .await
        .map_err(LendingApplicationError::UserRepositoryError)?
        .ok_or(LendingApplicationError::InvalidCredentials)?;

    let verified = deps
        .password_hasher
        .verify(password, &user.password_hash)
        .map_err(LendingApplicationError::PasswordHasherError)?;

    if !verified {
        tracing::debug!(user_id = %user.user_id.value(), "password mismatch");
        return Err(LendingApplicationError::InvalidCredentials);
    }

    Ok(user)
}

/// 司書権限を確認する
///
/// `denied_message`は拒否時に利用者へ返す文言。
pub fn ensure_librarian(user: &User, denied_message: &'static str) -> Result<()> {
    if !user.is_librarian() {
        tracing::debug!(user_id = %user.user_id.value(), "librarian role required");
        return Err(LendingApplicationError::Forbidden(denied_message));
    }
    Ok(())
}
