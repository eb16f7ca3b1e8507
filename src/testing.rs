//! In-memory fakes and fixtures shared by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

use crate::auth::repo::UserStore;
use crate::auth::repo_types::{NewUser, User};
use crate::config::AppConfig;
use crate::exercises::dto::{Exercise, ExerciseFilter};
use crate::exercises::repo::ExerciseCatalog;
use crate::gateway::{Envelope, HttpGateway};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub url: String,
    pub body: Value,
    pub params: Vec<(String, String)>,
}

fn record(url: &str, body: Value, params: &[(&str, &str)]) -> Recorded {
    Recorded {
        url: url.to_string(),
        body,
        params: params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// Answers the planner POST with a canned envelope and recipe GETs by the
/// last path segment of the URL.
#[derive(Default)]
pub struct FakeGateway {
    planner: Option<Envelope>,
    recipes: HashMap<String, Envelope>,
    posts: Mutex<Vec<Recorded>>,
    gets: Mutex<Vec<Recorded>>,
}

impl FakeGateway {
    pub fn with_planner_body(mut self, body: Value) -> Self {
        self.planner = Some(Envelope::ok(body.to_string()));
        self
    }

    pub fn with_planner_failure(mut self, status: u16, error: &str) -> Self {
        self.planner = Some(Envelope {
            status_code: status,
            body: String::new(),
            error: Some(error.to_string()),
        });
        self
    }

    pub fn with_recipe(mut self, id: &str, body: Value) -> Self {
        self.recipes.insert(id.to_string(), Envelope::ok(body.to_string()));
        self
    }

    pub fn posts(&self) -> Vec<Recorded> {
        self.posts.lock().unwrap().clone()
    }

    pub fn gets(&self) -> Vec<Recorded> {
        self.gets.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpGateway for FakeGateway {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Envelope {
        self.gets.lock().unwrap().push(record(url, Value::Null, params));
        let id = url.rsplit('/').next().unwrap_or_default();
        self.recipes.get(id).cloned().unwrap_or(Envelope {
            status_code: 404,
            body: String::new(),
            error: Some("Not Found".into()),
        })
    }

    async fn post(&self, url: &str, body: &Value, params: &[(&str, &str)]) -> Envelope {
        self.posts.lock().unwrap().push(record(url, body.clone(), params));
        self.planner
            .clone()
            .unwrap_or_else(|| Envelope::failed("no planner configured"))
    }
}

#[derive(Default)]
pub struct FakeUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for FakeUsers {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> anyhow::Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(created.clone());
        Ok(Some(created))
    }
}

pub struct FakeCatalog {
    entries: Mutex<Vec<Exercise>>,
}

impl FakeCatalog {
    pub fn new(entries: Vec<Exercise>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

fn same_key(a: &Exercise, b: &Exercise) -> bool {
    a.name == b.name
        && a.kind == b.kind
        && a.muscle == b.muscle
        && a.equipment == b.equipment
        && a.difficulty == b.difficulty
}

#[async_trait]
impl ExerciseCatalog for FakeCatalog {
    async fn find(&self, filter: &ExerciseFilter) -> anyhow::Result<Vec<Exercise>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                e.difficulty == filter.difficulty
                    && filter.types.contains(&e.kind)
                    && filter.muscles.contains(&e.muscle)
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, exercise: &Exercise) -> anyhow::Result<bool> {
        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|e| same_key(e, exercise)) {
            return Ok(false);
        }
        entries.push(exercise.clone());
        Ok(true)
    }
}

/// Catalog whose backing store is unreachable.
pub struct FailingCatalog;

#[async_trait]
impl ExerciseCatalog for FailingCatalog {
    async fn find(&self, _filter: &ExerciseFilter) -> anyhow::Result<Vec<Exercise>> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn insert(&self, _exercise: &Exercise) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

// --- fixtures ---

pub fn exercise(name: &str, muscle: &str) -> Exercise {
    Exercise {
        name: name.into(),
        kind: "strength".into(),
        muscle: muscle.into(),
        equipment: "body_only".into(),
        difficulty: "beginner".into(),
        instructions: "Do it slowly.".into(),
    }
}

/// Recipe detail payload with protein 40 g, carbs 100 g and fat 20 g in total.
pub fn recipe_json(name: &str, kcal: f64, servings: f64) -> Value {
    json!({
        "recipe": {
            "label": name,
            "images": {"SMALL": {"url": format!("https://img.test/{name}-small.jpg"), "width": 200}},
            "yield": servings,
            "totalNutrients": {
                "ENERC_KCAL": {"label": "Energy", "quantity": kcal, "unit": "kcal"},
                "PROCNT": {"label": "Protein", "quantity": 40.0, "unit": "g"},
                "CHOCDF": {"label": "Carbs", "quantity": 100.0, "unit": "g"},
                "FAT": {"label": "Fat", "quantity": 20.0, "unit": "g"}
            },
            "source": "Test Kitchen",
            "url": format!("https://recipes.test/{name}"),
            "ingredientLines": [format!("1 cup {name}")]
        }
    })
}

/// Planner response with `days` selection sets assigning `b<d>`, `l<d>`, `d<d>`.
pub fn planner_week(days: usize, status: &str) -> Value {
    let uri = |id: String| format!("http://www.edamam.com/ontologies/edamam.owl#{id}");
    let selection: Vec<Value> = (1..=days)
        .map(|d| {
            json!({"sections": {
                "Breakfast": {"assigned": uri(format!("b{d}"))},
                "Lunch": {"assigned": uri(format!("l{d}"))},
                "Dinner": {"assigned": uri(format!("d{d}"))}
            }})
        })
        .collect();
    json!({"status": status, "selection": selection})
}

pub fn test_state_from(gateway: FakeGateway, catalog: impl ExerciseCatalog + 'static) -> AppState {
    AppState::from_parts(
        Arc::new(AppConfig::for_tests()),
        Arc::new(gateway),
        Arc::new(FakeUsers::default()),
        Arc::new(catalog),
    )
}

pub fn test_state() -> AppState {
    test_state_from(FakeGateway::default(), FakeCatalog::new(vec![]))
}

pub fn test_state_with_gateway(gateway: FakeGateway) -> AppState {
    test_state_from(gateway, FakeCatalog::new(vec![]))
}

pub fn test_state_with_catalog(entries: Vec<Exercise>) -> AppState {
    test_state_from(FakeGateway::default(), FakeCatalog::new(entries))
}

// --- router calls ---

pub async fn call_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Same as [`call_raw`] but leaves the `Content-Type` header off.
pub async fn call_without_content_type(
    app: &Router,
    method: &str,
    uri: &str,
    body: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let raw = body.map(|b| b.to_string()).unwrap_or_default();
    call_raw(app, method, uri, &raw).await
}
