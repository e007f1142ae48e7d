//! Server test utilities.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use school_core_api::{ActorRef, EntityType};
use school_core_db::models::DeletableModel;
use school_core_db::repository::{CreateBatch, SoftDelete};
use school_core_db::utils::now_utc;
use school_core_memory::{MemoryEntityRepository, MemoryHistoryRepository};
use school_core_server::{create_router, AppState};
use school_core_service::{RecycleBinServiceImpl, ServiceConfig};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Router over the in-memory backend, with direct access to the entity
/// store for seeding.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub entities: Arc<MemoryEntityRepository>,
    pub actor: ActorRef,
}

#[allow(dead_code)]
impl TestServer {
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    pub fn with_config(config: ServiceConfig) -> Self {
        let entities = Arc::new(MemoryEntityRepository::new());
        let history = Arc::new(MemoryHistoryRepository::new());
        let service = RecycleBinServiceImpl::new(entities.clone(), history, config);
        let router = create_router(AppState::new(Arc::new(service)));

        Self {
            router,
            entities,
            actor: ActorRef::new(Uuid::new_v4(), "Test Admin").with_email("admin@school.test"),
        }
    }

    /// Insert an active row.
    pub async fn seed(&self, entity_type: EntityType, data: Value) -> DeletableModel {
        let row = DeletableModel::new(entity_type, data);
        self.entities
            .create_batch(vec![row.clone()])
            .await
            .expect("Failed to seed entity");
        row
    }

    /// Insert a row and move it to the recycle bin without going through HTTP.
    pub async fn seed_deleted(&self, entity_type: EntityType, data: Value) -> DeletableModel {
        let row = self.seed(entity_type, data).await;
        self.entities
            .soft_delete(entity_type, row.id, &self.actor, now_utc())
            .await
            .expect("Failed to soft-delete seeded entity")
            .expect("Seeded entity should be active");
        row
    }

    /// Send a request with the test actor's identity headers.
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        json_request(&self.router, method, uri, body, Some(&self.actor)).await
    }

    /// Send a request with no identity headers.
    pub async fn anonymous(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        json_request(&self.router, method, uri, body, None).await
    }
}

/// Helper to make JSON requests.
pub async fn json_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    actor: Option<&ActorRef>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(actor) = actor {
        builder = builder
            .header("x-actor-id", actor.id.to_string())
            .header("x-actor-name", actor.name.as_str());
        if let Some(email) = &actor.email {
            builder = builder.header("x-actor-email", email.as_str());
        }
    }

    let body = match body {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
