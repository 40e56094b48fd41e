pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::configuration::handlers as configuration;
use crate::responder::handlers as responder;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Configuration API
        .route(
            "/api/v1/configurations",
            get(configuration::handle_list_configurations)
                .post(configuration::handle_create_configuration),
        )
        .route(
            "/api/v1/configurations/latest",
            get(configuration::handle_latest_configuration),
        )
        .route(
            "/api/v1/configurations/:id",
            get(configuration::handle_get_configuration)
                .patch(configuration::handle_update_configuration),
        )
        // Response API
        .route(
            "/api/v1/responses/generate",
            post(responder::handle_generate),
        )
        .route("/api/v1/responses", get(responder::handle_list_responses))
        .route("/api/v1/responses/:id", get(responder::handle_get_response))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::{GenerationRequest, LlmError, TextGenerator};
    use crate::store::memory::{MemoryConfigurationStore, MemoryResponseStore};

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
            Ok(format!("Reply within {} tokens", request.max_tokens))
        }
    }

    fn test_router() -> Router {
        build_router(AppState {
            configurations: Arc::new(MemoryConfigurationStore::new()),
            responses: Arc::new(MemoryResponseStore::new()),
            generator: Arc::new(EchoGenerator),
        })
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let router = test_router();
        let (status, body) = send(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_save_creates_new_version_and_becomes_latest() {
        let router = test_router();
        let payload = json!({
            "restaurant_facts": { "name": "Harbor Grill", "type": "Seafood" },
            "customer_facts": { "name": "Ada" },
            "system_facts": { "prompt_template": "Hi {Customer Name}", "response_length": "short" }
        });

        let (status, created) =
            send(&router, "POST", "/api/v1/configurations", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 2);

        let (_, latest) = send(&router, "GET", "/api/v1/configurations/latest", None).await;
        assert_eq!(latest["id"], 2);
        assert_eq!(latest["restaurant_facts"]["type"], "Seafood");

        let (_, history) = send(&router, "GET", "/api/v1/configurations", None).await;
        assert_eq!(history.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_patch_updates_in_place() {
        let router = test_router();
        let (status, updated) = send(
            &router,
            "PATCH",
            "/api/v1/configurations/1",
            Some(json!({ "customer_facts": { "meal": "Brunch" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], 1);
        assert_eq!(updated["customer_facts"]["meal"], "Brunch");
        assert_eq!(updated["customer_facts"]["name"], "John Doe");

        let (status, _) = send(
            &router,
            "PATCH",
            "/api/v1/configurations/9",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generate_then_fetch_response() {
        let router = test_router();
        let (status, generated) = send(
            &router,
            "POST",
            "/api/v1/responses/generate",
            Some(json!({ "feedback_text": "Amazing dessert" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(generated["response"]["configuration_id"], 1);
        assert_eq!(generated["response"]["rendered_output"], "Reply within 500 tokens");
        assert_eq!(generated["analytics"]["sentiment"], "Positive");
        assert_eq!(generated["analytics"]["word_count"], 4);

        let id = generated["response"]["id"].as_u64().unwrap();
        let (status, fetched) =
            send(&router, "GET", &format!("/api/v1/responses/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["feedback_text"], "Amazing dessert");

        let (_, all) = send(&router, "GET", "/api/v1/responses", None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_error_responses() {
        let router = test_router();

        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/responses/generate",
            Some(json!({ "feedback_text": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/responses/generate",
            Some(json!({ "feedback_text": "Nice", "configuration_id": 77 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = send(&router, "GET", "/api/v1/responses/5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_validation_errors() {
        let router = test_router();
        let cases = [
            ("/api/v1/responses/generate", json!({})),
            ("/api/v1/configurations", json!({ "restaurant_facts": 5 })),
            (
                "/api/v1/configurations",
                json!({ "system_facts": { "response_length": null } }),
            ),
        ];

        for (uri, payload) in cases {
            let (status, body) = send(&router, "POST", uri, Some(payload.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {payload}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri} {payload}");
        }

        let (status, body) = send(
            &router,
            "PATCH",
            "/api/v1/configurations/1",
            Some(json!({ "customer_facts": "Brunch" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, history) = send(&router, "GET", "/api/v1/configurations", None).await;
        assert_eq!(history.as_array().unwrap().len(), 1, "nothing saved");
        let (_, responses) = send(&router, "GET", "/api/v1/responses", None).await;
        assert!(responses.as_array().unwrap().is_empty());
    }
}
