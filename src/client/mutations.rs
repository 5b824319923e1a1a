// src/client/mutations.rs

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::client::{
    cache::{QueryClient, QueryKey},
    http::{ApiClient, ClientError},
    resources::Resource,
};

/// Leituras e mutações de um tipo de recurso, com o protocolo otimista:
///
/// 1. fotografa a(s) chave(s) afetada(s);
/// 2. aplica a mudança especulativa no cache;
/// 3. dispara a requisição;
/// 4. falhou → restaura a fotografia exata e avisa;
/// 5. deu certo → invalida as chaves (a rebusca é quem confirma).
///
/// Rollback e invalidação nunca acontecem juntos para a mesma mutação.
pub struct CachedResource<T> {
    api: ApiClient,
    cache: Arc<QueryClient>,
    store_id: Uuid,
    _resource: PhantomData<T>,
}

impl<T: Resource> CachedResource<T> {
    pub fn new(api: ApiClient, cache: Arc<QueryClient>, store_id: Uuid) -> Self {
        Self {
            api,
            cache,
            store_id,
            _resource: PhantomData,
        }
    }

    fn list_key(&self) -> QueryKey {
        QueryKey::List {
            kind: T::KIND,
            store_id: self.store_id,
        }
    }

    fn detail_key(&self, id: Uuid) -> QueryKey {
        QueryKey::Detail {
            kind: T::KIND,
            store_id: self.store_id,
            id,
        }
    }

    fn list_url(&self) -> String {
        self.api.build_url(self.store_id, T::KIND.path(), None)
    }

    fn detail_url(&self, id: Uuid) -> String {
        self.api.build_url(self.store_id, T::KIND.path(), Some(id))
    }

    /// Lista com cache: serve o valor fresco se houver; senão (ou se o
    /// cache guardar um palpite que não tipa) busca no servidor e grava.
    pub async fn list(&self) -> Result<Vec<T>, ClientError> {
        let key = self.list_key();

        if let Some(cached) = self.cache.fresh_value(&key) {
            if let Ok(decoded) = serde_json::from_value::<Vec<T>>(cached) {
                return Ok(decoded);
            }
        }

        let fetched = self.api.get_json(&self.list_url()).await?;
        self.cache.set(key, fetched.clone());

        Ok(serde_json::from_value(fetched)?)
    }

    pub async fn get(&self, id: Uuid) -> Result<T, ClientError> {
        let key = self.detail_key(id);

        if let Some(cached) = self.cache.fresh_value(&key) {
            if let Ok(decoded) = serde_json::from_value::<T>(cached) {
                return Ok(decoded);
            }
        }

        let fetched = self.api.get_json(&self.detail_url(id)).await?;
        self.cache.set(key, fetched.clone());

        Ok(serde_json::from_value(fetched)?)
    }

    /// Criação otimista: anexa o rascunho à lista cacheada com um id
    /// provisório (nulo) antes de o servidor responder.
    pub async fn create<D: Serialize>(&self, draft: &D) -> Result<T, ClientError> {
        let key = self.list_key();
        let snapshot = self.cache.snapshot(&key);

        let body = serde_json::to_value(draft)?;

        // O palpite: o rascunho com identidade provisória e carimbo local.
        let mut optimistic = body.clone();
        if let Value::Object(map) = &mut optimistic {
            map.insert("id".to_string(), json!(Uuid::nil()));
            map.insert("storeId".to_string(), json!(self.store_id));
            map.insert("createdAt".to_string(), json!(Utc::now()));
            map.insert("updatedAt".to_string(), json!(Utc::now()));
        }

        let mut speculative = snapshot
            .as_ref()
            .and_then(|entry| entry.value.as_array().cloned())
            .unwrap_or_default();
        speculative.push(optimistic);
        self.cache.set(key.clone(), Value::Array(speculative));

        match self
            .api
            .request(Method::POST, &self.list_url(), Some(&body))
            .await
        {
            Err(error) => {
                self.cache.restore(key, snapshot);
                tracing::warn!(kind = ?T::KIND, %error, "criação falhou; cache restaurado");
                Err(error)
            }
            Ok(created) => {
                // O valor otimista nunca é promovido a definitivo.
                self.cache.invalidate(&key);
                Ok(serde_json::from_value(created)?)
            }
        }
    }

    /// Atualização otimista: funde os campos do rascunho sobre o detalhe
    /// cacheado (se houver).
    pub async fn update<D: Serialize>(&self, id: Uuid, draft: &D) -> Result<T, ClientError> {
        let detail_key = self.detail_key(id);
        let snapshot = self.cache.snapshot(&detail_key);

        let body = serde_json::to_value(draft)?;

        if let Some(entry) = &snapshot {
            let mut merged = entry.value.clone();
            if let (Value::Object(target), Value::Object(changes)) = (&mut merged, &body) {
                for (field, value) in changes {
                    target.insert(field.clone(), value.clone());
                }
            }
            self.cache.set(detail_key.clone(), merged);
        }

        match self
            .api
            .request(Method::PATCH, &self.detail_url(id), Some(&body))
            .await
        {
            Err(error) => {
                self.cache.restore(detail_key, snapshot);
                tracing::warn!(kind = ?T::KIND, %id, %error, "atualização falhou; cache restaurado");
                Err(error)
            }
            Ok(updated) => {
                self.cache.invalidate(&detail_key);
                self.cache.invalidate(&self.list_key());
                Ok(serde_json::from_value(updated)?)
            }
        }
    }

    /// Remoção otimista: some da lista cacheada na hora.
    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let key = self.list_key();
        let snapshot = self.cache.snapshot(&key);

        if let Some(entry) = &snapshot {
            if let Some(list) = entry.value.as_array() {
                let filtered: Vec<Value> = list
                    .iter()
                    .filter(|item| item.get("id") != Some(&json!(id)))
                    .cloned()
                    .collect();
                self.cache.set(key.clone(), Value::Array(filtered));
            }
        }

        match self
            .api
            .request(Method::DELETE, &self.detail_url(id), None)
            .await
        {
            Err(error) => {
                self.cache.restore(key, snapshot);
                tracing::warn!(kind = ?T::KIND, %id, %error, "remoção falhou; cache restaurado");
                Err(error)
            }
            Ok(_) => {
                self.cache.invalidate(&key);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use uuid::Uuid;

    use crate::client::{
        http::{ApiClient, ClientError},
        resources::{BillboardDraft, StoreClient},
    };
    use crate::config::AppState;
    use crate::router::app_router;
    use crate::testing::{seed_store, test_state};

    const OWNER: &str = "user_dono";

    // Servidor de verdade numa porta qualquer; o cliente fala HTTP com ele.
    async fn spawn_server(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("porta livre");
        let addr = listener.local_addr().expect("addr");
        let app = app_router(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("servidor de teste");
        });

        format!("http://{addr}")
    }

    async fn client_for(state: &AppState, base_url: &str, store_id: Uuid) -> StoreClient {
        let token = state
            .auth_service
            .create_token(OWNER)
            .expect("token de teste");
        StoreClient::new(ApiClient::new(base_url).with_bearer(token), store_id)
    }

    fn draft(label: &str) -> BillboardDraft {
        BillboardDraft {
            label: label.to_string(),
            image_url: format!("https://x/{label}.png"),
        }
    }

    #[tokio::test]
    async fn sucesso_invalida_e_a_leitura_seguinte_vem_do_servidor() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let base_url = spawn_server(state.clone()).await;
        let client = client_for(&state, &base_url, store.id).await;

        let billboards = client.billboards();
        assert_eq!(billboards.list().await.expect("lista inicial").len(), 0);

        let created = billboards.create(&draft("Lançamento")).await.expect("criação");
        // O servidor atribuiu identidade real, não o placeholder nulo.
        assert_ne!(created.id, Uuid::nil());

        // A lista pós-sucesso vem refeita do servidor: uma entrada, com o
        // id definitivo, nunca o valor otimista.
        let after = billboards.list().await.expect("lista pós-criação");
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, created.id);
        assert_eq!(after[0].label, "Lançamento");
    }

    #[tokio::test]
    async fn falha_na_criacao_restaura_o_cache_bit_a_bit() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let base_url = spawn_server(state.clone()).await;
        let client = client_for(&state, &base_url, store.id).await;

        let billboards = client.billboards();
        billboards.list().await.expect("aquece o cache");

        let key = crate::client::cache::QueryKey::List {
            kind: crate::client::cache::ResourceKind::Billboards,
            store_id: store.id,
        };
        let before = client.cache().get(&key);

        // Label vazio: o servidor responde 400 e nada é gravado.
        let result = billboards.create(&draft("")).await;
        match result {
            Err(ClientError::Api { status, .. }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST)
            }
            other => panic!("esperava erro da API, veio {other:?}"),
        }

        // Rollback integral: valor E flag de frescor idênticos.
        assert_eq!(client.cache().get(&key), before);

        // E a leitura seguinte continua vazia.
        assert_eq!(billboards.list().await.expect("lista").len(), 0);
    }

    #[tokio::test]
    async fn falha_na_atualizacao_restaura_o_detalhe() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let base_url = spawn_server(state.clone()).await;
        let client = client_for(&state, &base_url, store.id).await;

        let billboards = client.billboards();
        let created = billboards.create(&draft("Original")).await.expect("criação");

        // Aquece o detalhe no cache.
        let detail = billboards.get(created.id).await.expect("detalhe");
        assert_eq!(detail.label, "Original");

        let key = crate::client::cache::QueryKey::Detail {
            kind: crate::client::cache::ResourceKind::Billboards,
            store_id: store.id,
            id: created.id,
        };
        let before = client.cache().get(&key);

        let result = billboards.update(created.id, &draft("")).await;
        assert!(result.is_err());
        assert_eq!(client.cache().get(&key), before);

        // O servidor nunca viu a mudança.
        let detail = billboards.get(created.id).await.expect("detalhe");
        assert_eq!(detail.label, "Original");
    }

    #[tokio::test]
    async fn remocao_otimista_confirmada_pela_rebusca() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let base_url = spawn_server(state.clone()).await;
        let client = client_for(&state, &base_url, store.id).await;

        let billboards = client.billboards();
        let fica = billboards.create(&draft("Fica")).await.expect("criação");
        let sai = billboards.create(&draft("Sai")).await.expect("criação");

        assert_eq!(billboards.list().await.expect("lista").len(), 2);

        billboards.delete(sai.id).await.expect("remoção");

        let after = billboards.list().await.expect("lista final");
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, fica.id);
    }

    #[tokio::test]
    async fn atualizacao_bem_sucedida_invalida_detalhe_e_lista() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let base_url = spawn_server(state.clone()).await;
        let client = client_for(&state, &base_url, store.id).await;

        let billboards = client.billboards();
        let created = billboards.create(&draft("Antes")).await.expect("criação");
        billboards.list().await.expect("aquece a lista");

        let updated = billboards
            .update(created.id, &draft("Depois"))
            .await
            .expect("atualização");
        assert_eq!(updated.label, "Depois");

        // As duas chaves foram invalidadas; as leituras refletem o servidor.
        let detail = billboards.get(created.id).await.expect("detalhe");
        assert_eq!(detail.label, "Depois");
        let list = billboards.list().await.expect("lista");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].label, "Depois");
    }
}
