// src/services/payment.rs

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::common::error::AppError;

// Configuração do gateway (Paymob), vinda do ambiente.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub secret_key: String,
    pub public_key: String,
    pub api_url: String,
    pub integration_id: i64,
    pub backend_url: String,
    pub frontend_url: String,
}

// A resposta da intenção só nos interessa pelo client_secret.
#[derive(Debug, Deserialize)]
struct IntentionResponse {
    client_secret: String,
}

/// Cliente da API de intenções de pagamento. A única chamada externa do
/// backend com timeout explícito: o checkout não pode ficar pendurado no
/// gateway.
#[derive(Clone)]
pub struct PaymentGateway {
    http: reqwest::Client,
    config: PaymentConfig,
}

impl PaymentGateway {
    pub fn new(config: PaymentConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { http, config })
    }

    /// Pede uma intenção de pagamento ao gateway e devolve o client_secret.
    /// `payment_data` é repassado como veio do checkout (valores, moeda,
    /// billing_data); nós só anexamos as URLs de retorno e o método.
    pub async fn create_intention(
        &self,
        store_id: Uuid,
        payment_data: &Map<String, Value>,
    ) -> Result<String, AppError> {
        let mut body = payment_data.clone();
        body.insert(
            "notification_url".to_string(),
            json!(format!(
                "{}/api/stores/{}/webhook",
                self.config.backend_url, store_id
            )),
        );
        body.insert(
            "payment_methods".to_string(),
            json!([self.config.integration_id]),
        );
        body.insert(
            "redirection_url".to_string(),
            json!(format!("{}/success", self.config.frontend_url)),
        );

        let response = self
            .http
            .post(format!("{}/v1/intention/", self.config.api_url))
            .header("Authorization", format!("Token {}", self.config.secret_key))
            .json(&body)
            .send()
            .await
            .map_err(AppError::PaymentGateway)?
            .error_for_status()
            .map_err(AppError::PaymentGateway)?;

        let intention: IntentionResponse =
            response.json().await.map_err(AppError::PaymentGateway)?;

        Ok(intention.client_secret)
    }

    /// URL do checkout hospedado para onde o comprador é redirecionado.
    pub fn hosted_checkout_url(&self, client_secret: &str) -> String {
        format!(
            "{}/unifiedcheckout/?publicKey={}&clientSecret={}",
            self.config.api_url, self.config.public_key, client_secret
        )
    }
}
