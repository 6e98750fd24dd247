use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::error::{AdGenError, Result};

/// Attribute of the stored extraction payload that holds the document text.
/// The store keeps the full output of the upstream extraction step; this
/// service only ever reads this one field.
pub const EXTRACTED_TEXT_KEY: &str = "extracted_text";

/// Outcome of a point lookup. A miss is an expected result, not an error,
/// and is distinguishable from a document whose extracted text is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLookup {
    Found(String),
    NotFound,
}

/// Read-only seam over the external document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch_document(&self, document_id: &str) -> Result<DocumentLookup>;
}

fn extracted_text(document_id: &str, extraction: &Value) -> Result<String> {
    extraction
        .get(EXTRACTED_TEXT_KEY)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            AdGenError::Store(format!(
                "document {document_id} has no '{EXTRACTED_TEXT_KEY}' attribute"
            ))
        })
}

/// Document store backed by Postgres. One point read per request, keyed by
/// primary key; no caching and no write path.
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn fetch_document(&self, document_id: &str) -> Result<DocumentLookup> {
        let row = sqlx::query("SELECT extraction FROM documents WHERE id = $1")
            .bind(document_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AdGenError::Store(e.to_string()))?;

        let Some(row) = row else {
            return Ok(DocumentLookup::NotFound);
        };

        let extraction: Value = row
            .try_get("extraction")
            .map_err(|e| AdGenError::Store(e.to_string()))?;

        Ok(DocumentLookup::Found(extracted_text(document_id, &extraction)?))
    }
}

/// In-memory implementation of DocumentStore, for tests and local runs.
pub struct InMemoryDocumentStore {
    documents: DashMap<String, Value>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    pub fn insert(&self, document_id: impl Into<String>, extraction: Value) {
        self.documents.insert(document_id.into(), extraction);
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn fetch_document(&self, document_id: &str) -> Result<DocumentLookup> {
        match self.documents.get(document_id) {
            Some(extraction) => Ok(DocumentLookup::Found(extracted_text(
                document_id,
                extraction.value(),
            )?)),
            None => Ok(DocumentLookup::NotFound),
        }
    }
}
