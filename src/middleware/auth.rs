// src/middleware/auth.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{common::error::AppError, config::AppState};

// Extrator para obter a identidade autenticada diretamente nos handlers.
// Valida o header `Authorization: Bearer <jwt>` contra o segredo
// compartilhado com o provedor de identidade e guarda o ID do utilizador.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for AuthIdentity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let user_id = app_state.auth_service.validate_token(token)?;

        Ok(AuthIdentity { user_id })
    }
}
