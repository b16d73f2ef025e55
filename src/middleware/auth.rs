use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::auth::{AuthError, Claims};

/// Authenticated caller, inserted into request extensions by [`jwt_auth_middleware`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
    pub claims: Claims,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            claims,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingToken => StatusCode::UNAUTHORIZED.into_response(),
            AuthError::InvalidToken(_) => StatusCode::FORBIDDEN.into_response(),
            AuthError::ExpiryOutOfRange(_) | AuthError::TokenGeneration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Bearer authentication for routes scoped to the caller.
///
/// 401 with an empty body when no token is presented, 403 when the token does
/// not verify. On success the request continues with an [`AuthUser`] attached.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let token = extract_bearer_token(&headers);

    let claims = match state.verifier.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!("Rejected {} {}: {}", request.method(), request.uri().path(), err);
            return err.into_response();
        }
    };

    request.extensions_mut().insert(AuthUser::from(claims));
    next.run(request).await
}

/// Second whitespace-separated word of the Authorization header.
/// The scheme word is not checked.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_whitespace()
        .nth(1)
}
