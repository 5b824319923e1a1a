// src/services/auth.rs

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

// Estrutura de dados ("claims") dentro do JWT emitido pelo provedor de
// identidade. Só precisamos do `sub` (o ID opaco do utilizador).
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (ID do usuário no provedor)
    pub exp: usize,  // Expiration time (quando o token expira)
    pub iat: usize,  // Issued At (quando o token foi criado)
}

// O registro e o login acontecem no provedor de identidade; aqui apenas
// validamos o token assinado com o segredo compartilhado.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    /// Valida o token e devolve o ID do utilizador autenticado.
    pub fn validate_token(&self, token: &str) -> Result<String, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims.sub)
    }

    /// Emite um token para um utilizador (útil em ambientes sem o provedor,
    /// como os testes de integração).
    pub fn create_token(&self, user_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_emitido_e_validado_com_o_mesmo_segredo() {
        let service = AuthService::new("segredo-de-teste".to_string());
        let token = service.create_token("user_abc123").expect("token");

        let sub = service.validate_token(&token).expect("validação");
        assert_eq!(sub, "user_abc123");
    }

    #[test]
    fn token_com_segredo_errado_e_rejeitado() {
        let emissor = AuthService::new("segredo-a".to_string());
        let validador = AuthService::new("segredo-b".to_string());

        let token = emissor.create_token("user_abc123").expect("token");
        let result = validador.validate_token(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn lixo_nao_passa_na_validacao() {
        let service = AuthService::new("segredo-de-teste".to_string());
        assert!(matches!(
            service.validate_token("nem-um-jwt"),
            Err(AppError::InvalidToken)
        ));
    }
}
