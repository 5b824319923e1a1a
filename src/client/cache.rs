// src/client/cache.rs

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use uuid::Uuid;

// Que tipo de recurso a chave endereça.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Billboards,
    Categories,
    Sizes,
    Colors,
    Products,
}

impl ResourceKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::Billboards => "billboards",
            Self::Categories => "categories",
            Self::Sizes => "sizes",
            Self::Colors => "colors",
            Self::Products => "products",
        }
    }
}

// Duas classes de chave, sempre com o escopo da loja:
// a lista inteira de um tipo, ou o detalhe de um item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    List { kind: ResourceKind, store_id: Uuid },
    Detail { kind: ResourceKind, store_id: Uuid, id: Uuid },
}

// Entrada do cache: o valor e o flag de "precisa refazer a busca".
// Invalidar NÃO apaga o valor; só o marca como suspeito.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub stale: bool,
}

/// Cache de consultas compartilhado pelo painel. Os valores são JSON puro
/// (o que veio do servidor, ou o palpite otimista); a tipagem acontece na
/// borda, ao devolver para quem consome.
///
/// Escritas concorrentes são serializadas pelo mutex; a última vence. O
/// valor com autoridade vem sempre da rebusca pós-invalidação.
#[derive(Debug, Default)]
pub struct QueryClient {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// O valor cacheado, fresco ou não.
    pub fn get(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.entries.lock().expect("cache lock").get(key).cloned()
    }

    /// Só devolve se a entrada existir E não estiver marcada como stale.
    pub fn fresh_value(&self, key: &QueryKey) -> Option<Value> {
        self.entries
            .lock()
            .expect("cache lock")
            .get(key)
            .filter(|entry| !entry.stale)
            .map(|entry| entry.value.clone())
    }

    /// Grava um valor fresco (busca concluída ou escrita especulativa).
    pub fn set(&self, key: QueryKey, value: Value) {
        self.entries
            .lock()
            .expect("cache lock")
            .insert(key, CacheEntry { value, stale: false });
    }

    /// Marca como stale: a próxima leitura refaz a busca no servidor.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(entry) = self.entries.lock().expect("cache lock").get_mut(key) {
            entry.stale = true;
        }
    }

    /// Fotografia exata da entrada (valor + flag), para rollback.
    pub fn snapshot(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.get(key)
    }

    /// Restaura a fotografia: `Some` volta byte a byte, `None` remove a
    /// entrada criada especulativamente.
    pub fn restore(&self, key: QueryKey, snapshot: Option<CacheEntry>) {
        let mut entries = self.entries.lock().expect("cache lock");
        match snapshot {
            Some(entry) => {
                entries.insert(key, entry);
            }
            None => {
                entries.remove(&key);
            }
        }
    }
}
