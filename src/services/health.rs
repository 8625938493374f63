use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::content::{PromptDeck, PromptKind};
use crate::polls::PollManager;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub polls: PollHealth,
    pub prompts: BTreeMap<String, usize>,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PollHealth {
    pub tracked: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub polls: PollManager,
    pub deck: Arc<PromptDeck>,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(polls: PollManager, deck: Arc<PromptDeck>) -> Self {
        let state = AppState {
            polls,
            deck,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(state);

        Self { router }
    }
}

fn decks_loaded(deck: &PromptDeck) -> bool {
    PromptKind::ALL.iter().all(|kind| deck.count(*kind) > 0)
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let prompts = PromptKind::ALL
        .iter()
        .map(|kind| (kind.to_string(), state.deck.count(*kind)))
        .collect();

    let health_response = HealthResponse {
        status: if decks_loaded(&state.deck) { "healthy" } else { "degraded" }.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        polls: PollHealth {
            tracked: state.polls.store().len(),
        },
        prompts,
        uptime_seconds: uptime,
    };

    Ok(Json(health_response))
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    if decks_loaded(&state.deck) {
        Ok(Json("ready"))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn liveness_check() -> Json<&'static str> {
    // If this endpoint responds, the service is alive
    Json("alive")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polls::{Markup, PollFormat, PollKey, PollSession, PollStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use std::time::Duration;

    fn create_test_health_service(deck: PromptDeck) -> (HealthService, PollManager) {
        let polls = PollManager::new(
            Arc::new(PollStore::new(10, Duration::from_secs(3600))),
            PollFormat::default(),
            Markup::Plain,
        );
        (HealthService::new(polls.clone(), Arc::new(deck)), polls)
    }

    fn full_deck() -> PromptDeck {
        PromptDeck::from_lists(
            PromptKind::ALL.map(|kind| (kind, vec![format!("{kind} prompt")])),
        )
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (health_service, polls) = create_test_health_service(full_deck());
        polls.register(PollKey::new(1, 1), PollSession::default());
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let health_response: HealthResponse = response.json();
        assert_eq!(health_response.status, "healthy");
        assert_eq!(health_response.polls.tracked, 1);
        assert_eq!(health_response.prompts.get("truths"), Some(&1));
        assert_eq!(health_response.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_reports_empty_decks() {
        let (health_service, _polls) = create_test_health_service(PromptDeck::default());
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let health_response: HealthResponse = server.get("/health").await.json();
        assert_eq!(health_response.status, "degraded");
        assert_eq!(health_response.prompts.get("tot"), Some(&0));
    }

    #[tokio::test]
    async fn test_readiness_endpoint() {
        let (health_service, _polls) = create_test_health_service(full_deck());
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/ready").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let ready_response: String = response.json();
        assert_eq!(ready_response, "ready");
    }

    #[tokio::test]
    async fn test_readiness_fails_without_prompts() {
        let (health_service, _polls) = create_test_health_service(PromptDeck::default());
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/ready").expect_failure().await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let (health_service, _polls) = create_test_health_service(PromptDeck::default());
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/live").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let alive_response: String = response.json();
        assert_eq!(alive_response, "alive");
    }
}
