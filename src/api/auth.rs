use crate::application::lending::{LendingApplicationError, authenticate};
use crate::domain::User;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use std::sync::Arc;

use super::{error::ApiError, handlers::AppState};

/// Basic認証で解決された利用者
///
/// リクエストごとに認証情報ストアで検証する。
/// 役割の確認は各ユースケース側で行う。
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(credentials)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::from(LendingApplicationError::InvalidCredentials))?;

        let user = authenticate(
            &state.service_deps,
            credentials.username(),
            credentials.password(),
        )
        .await?;

        Ok(Self(user))
    }
}
