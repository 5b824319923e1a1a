// src/client/http.rs

use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

// Erros da camada de cliente. `Api` carrega o status para o chamador
// decidir o que mostrar; o corpo vai junto para diagnóstico.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("erro de rede: {0}")]
    Http(#[from] reqwest::Error),

    #[error("a API respondeu {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("resposta fora do formato esperado: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Wrapper fino sobre o reqwest com a URL base do backend, análogo ao
/// fetch tipado que o painel usa. Sem retry e sem timeout próprio: quem
/// decide o que fazer com a falha é a camada de mutação.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Anexa o token do provedor de identidade às próximas requisições.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// `/api/stores/{store}/{path}` ou `/api/stores/{store}/{path}/{id}`.
    pub fn build_url(&self, store_id: Uuid, path: &str, id: Option<Uuid>) -> String {
        match id {
            Some(id) => format!("{}/api/stores/{}/{}/{}", self.base_url, store_id, path, id),
            None => format!("{}/api/stores/{}/{}", self.base_url, store_id, path),
        }
    }

    pub async fn get_json(&self, url: &str) -> Result<Value, ClientError> {
        self.request(Method::GET, url, None).await
    }

    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Api { status, body: text });
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
