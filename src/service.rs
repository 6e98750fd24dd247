use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    completion::{CompletionModel, HttpCompletionClient},
    config::AppConfig,
    error::AdGenError,
    language::map_country_to_language,
    models::{GenerateAdRequest, GenerateAdResponse},
    pipeline::generate_ad_copy,
    store::{DocumentLookup, DocumentStore, PostgresDocumentStore},
};

type ApiResult<T> = Result<Json<T>, ApiError>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn not_found_error(message: &str, id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": message,
            "document_id": id
        })),
    )
}

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}

/// Converts a domain error into its HTTP shape. Upstream details go to the
/// log, not the response body.
fn api_error(err: AdGenError) -> ApiError {
    match err {
        AdGenError::BadRequest(message) => bad_request_error(&message),
        AdGenError::DocumentNotFound(id) => not_found_error("Document not found", &id),
        AdGenError::Store(details) => {
            error!("document store failure: {details}");
            internal_error("Failed to read document store")
        }
        AdGenError::Upstream(details) => {
            error!("completion service failure: {details}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Ad generation failed" })),
            )
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub completion: Arc<dyn CompletionModel>,
}

pub async fn create_app(config: &AppConfig) -> anyhow::Result<Router> {
    let store = PostgresDocumentStore::connect(&config.database_url).await?;
    let completion = HttpCompletionClient::new(
        config.completion_api_url.clone(),
        config.completion_api_key.clone(),
        config.completion_model_id.clone(),
    );

    let state = AppState {
        store: Arc::new(store),
        completion: Arc::new(completion),
    };

    Ok(build_router(state))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ads/generate", post(generate_ad))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Pharma Ad Generation Service",
        "version": "1.0.0",
        "description": "Generates pharmaceutical marketing copy from previously extracted product descriptions",
        "endpoints": {
            "POST /ads/generate": "Generate ad title and summary for a stored document",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// One ad-generation request, start to finish: fetch the stored document,
/// resolve the target language, then run the three completion stages in
/// sequence. Any failure terminates the request; a partial response is
/// never produced.
async fn generate_ad(
    State(state): State<AppState>,
    Json(request): Json<GenerateAdRequest>,
) -> ApiResult<GenerateAdResponse> {
    let request_id = Uuid::new_v4();
    let document_id = &request.document_id.value;

    validate_document_id(document_id).map_err(api_error)?;

    info!(
        %request_id,
        %document_id,
        location = %request.location.value,
        fda = %request.fda.value,
        "generating ad copy"
    );

    let document_text = match state.store.fetch_document(document_id).await.map_err(api_error)? {
        DocumentLookup::Found(text) => text,
        DocumentLookup::NotFound => {
            return Err(api_error(AdGenError::DocumentNotFound(document_id.clone())));
        }
    };

    let language = map_country_to_language(&request.location.value);

    let copy = generate_ad_copy(
        state.completion.as_ref(),
        &document_text,
        language,
        &request.fda.value,
    )
    .await
    .map_err(api_error)?;

    info!(%request_id, "ad copy generated");

    Ok(Json(GenerateAdResponse {
        title: copy.title,
        summary: copy.summary,
    }))
}

fn validate_document_id(document_id: &str) -> Result<(), AdGenError> {
    if document_id.trim().is_empty() {
        return Err(AdGenError::BadRequest("document_id is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::GenerationRequest;
    use crate::models::FieldValue;
    use crate::store::InMemoryDocumentStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedModel {
        completions: Vec<&'static str>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl ScriptedModel {
        fn new(completions: Vec<&'static str>) -> Self {
            Self {
                completions,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                completions: Vec::new(),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionModel for ScriptedModel {
        async fn complete(&self, request: &GenerationRequest) -> crate::error::Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(request.prompt.clone());
            if self.fail {
                return Err(AdGenError::Upstream(
                    "completion service returned 500".to_string(),
                ));
            }
            Ok(self.completions[call].to_string())
        }
    }

    fn app_state(store: InMemoryDocumentStore, model: Arc<ScriptedModel>) -> AppState {
        AppState {
            store: Arc::new(store),
            completion: model,
        }
    }

    fn request(document_id: &str, location: &str, fda: &str) -> GenerateAdRequest {
        GenerateAdRequest {
            document_id: FieldValue {
                value: document_id.to_string(),
            },
            location: FieldValue {
                value: location.to_string(),
            },
            fda: FieldValue {
                value: fda.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn generates_title_and_summary_for_stored_document() {
        let store = InMemoryDocumentStore::new();
        store.insert("doc-1", json!({ "extracted_text": "Pain reliever tablet, 200mg" }));
        let model = Arc::new(ScriptedModel::new(vec![
            "Relievol",
            "Um resumo de quatro frases.",
            "Sinta-se bem com Relievol!",
        ]));

        let result = generate_ad(
            State(app_state(store, model.clone())),
            Json(request("doc-1", "Brazil", "No")),
        )
        .await;

        let Json(response) = result.unwrap();
        assert_eq!(response.summary, "Um resumo de quatro frases.");
        assert_eq!(response.title, "Sinta-se bem com Relievol!");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("Pain reliever tablet, 200mg"));
        // Brazil resolves to portuguese and fda != "Yes" takes the
        // persuasive template.
        assert!(prompts[1].contains("portuguese"));
        assert!(prompts[1].contains("Pain reliever tablet, 200mg"));
        assert!(prompts[1].contains("ask their doctor"));
        assert!(prompts[2].contains("portuguese"));
        assert!(prompts[2].contains("Um resumo de quatro frases."));
    }

    #[tokio::test]
    async fn fda_yes_selects_guideline_template() {
        let store = InMemoryDocumentStore::new();
        store.insert("doc-1", json!({ "extracted_text": "Antihistamine, 10mg" }));
        let model = Arc::new(ScriptedModel::new(vec!["Brand", "Summary.", "Title."]));

        generate_ad(
            State(app_state(store, model.clone())),
            Json(request("doc-1", "Germany", "Yes")),
        )
        .await
        .unwrap();

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[1].contains("following FDA's prescription drug advertising"));
        assert!(!prompts[1].contains("ask their doctor"));
        assert!(prompts[1].contains("german"));
    }

    #[tokio::test]
    async fn missing_document_is_404_and_skips_generation() {
        let store = InMemoryDocumentStore::new();
        let model = Arc::new(ScriptedModel::new(vec![]));

        let result = generate_ad(
            State(app_state(store, model.clone())),
            Json(request("missing", "France", "No")),
        )
        .await;

        let (status, _) = result.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn completion_failure_is_an_error_response() {
        let store = InMemoryDocumentStore::new();
        store.insert("doc-1", json!({ "extracted_text": "desc" }));
        let model = Arc::new(ScriptedModel::failing());

        let result = generate_ad(
            State(app_state(store, model.clone())),
            Json(request("doc-1", "Italy", "No")),
        )
        .await;

        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.get("error").is_some());
        assert!(body.get("title").is_none());
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_document_id_is_bad_request() {
        let store = InMemoryDocumentStore::new();
        let model = Arc::new(ScriptedModel::new(vec![]));

        let result = generate_ad(
            State(app_state(store, model.clone())),
            Json(request("  ", "Mexico", "No")),
        )
        .await;

        let (status, _) = result.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(model.call_count(), 0);
    }
}
