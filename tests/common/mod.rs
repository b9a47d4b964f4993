//! In-process stand-in for the customer REST API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use customer_panel::domain::customer::Customer;
use customer_panel::domain::filter::{FilterField, FilterState};
use customer_panel::repository::HttpRepository;
use serde_json::{Value, json};
use tokio::net::TcpListener;

type Reply = (StatusCode, Json<Value>);

#[derive(Clone, Default)]
pub struct Backend {
    customers: Arc<Mutex<Vec<Value>>>,
    requests: Arc<Mutex<Vec<String>>>,
    fail_lists: Arc<Mutex<bool>>,
}

impl Backend {
    /// Backend holding customers `1..=count`. Even ids are inactive "Ann"s,
    /// odd ids active "Bob"s.
    pub fn seeded(count: i64) -> Self {
        let backend = Self::default();
        *backend.customers.lock().unwrap() = (1..=count).map(customer_json).collect();
        backend
    }

    /// Path and query of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn customer(&self, id: i64) -> Option<Value> {
        self.customers
            .lock()
            .unwrap()
            .iter()
            .find(|row| row["id"] == id)
            .cloned()
    }

    pub fn fail_lists(&self, fail: bool) {
        *self.fail_lists.lock().unwrap() = fail;
    }

    fn record(&self, uri: &Uri) {
        let target = uri
            .path_and_query()
            .map(|target| target.to_string())
            .unwrap_or_default();
        self.requests.lock().unwrap().push(target);
    }

    /// Serves the API on an ephemeral port and returns a repository for it.
    pub async fn spawn(&self) -> HttpRepository {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new()
            .route("/api/customers", get(list).post(create))
            .route("/api/customers/:id", get(show).put(update))
            .route("/api/customer-filter", get(filter))
            .with_state(self.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpRepository::with_client(client, &format!("http://{addr}/api")).unwrap()
    }
}

fn customer_json(id: i64) -> Value {
    json!({
        "id": id,
        "first_name": if id % 2 == 0 { "Ann" } else { "Bob" },
        "last_name": format!("Customer{id}"),
        "phone": format!("08{id:06}"),
        "email": format!("customer{id}@example.com"),
        "is_activated": id % 2,
        "created_by": "admin",
        "updated_by": null,
        "created_at": format!("2024-01-{:02} 10:00:00", (id - 1) % 28 + 1),
        "updated_at": null,
    })
}

fn message(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "message": message })))
}

fn page_of(rows: Vec<Value>, params: &HashMap<String, String>) -> Reply {
    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let per_page: usize = params
        .get("per_page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(10);

    let total = rows.len();
    let last_page = total.div_ceil(per_page).max(1);
    let skip = (page.max(1) - 1) * per_page;
    let data: Vec<Value> = rows.into_iter().skip(skip).take(per_page).collect();
    let (from, to) = if data.is_empty() {
        (Value::Null, Value::Null)
    } else {
        (json!(skip + 1), json!(skip + data.len()))
    };

    (
        StatusCode::OK,
        Json(json!({
            "data": {
                "data": data,
                "current_page": page,
                "from": from,
                "last_page": last_page,
                "per_page": per_page.to_string(),
                "prev_page_url": null,
                "next_page_url": null,
                "to": to,
                "total": total,
            }
        })),
    )
}

async fn list(
    State(backend): State<Backend>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    backend.record(&uri);
    if *backend.fail_lists.lock().unwrap() {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }
    let rows = backend.customers.lock().unwrap().clone();
    page_of(rows, &params)
}

async fn filter(
    State(backend): State<Backend>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    backend.record(&uri);
    let mut state = FilterState::new();
    state.merge(
        params
            .iter()
            .filter_map(|(key, value)| Some((key.parse::<FilterField>().ok()?, value))),
    );

    let rows = backend
        .customers
        .lock()
        .unwrap()
        .iter()
        .filter(|row| {
            serde_json::from_value::<Customer>((*row).clone())
                .is_ok_and(|customer| state.matches(&customer))
        })
        .cloned()
        .collect();
    page_of(rows, &params)
}

async fn show(State(backend): State<Backend>, uri: Uri, Path(id): Path<i64>) -> Reply {
    backend.record(&uri);
    match backend.customer(id) {
        Some(row) => (StatusCode::OK, Json(json!({ "data": row }))),
        None => message(StatusCode::NOT_FOUND, "Not Found"),
    }
}

async fn create(State(backend): State<Backend>, uri: Uri, Json(body): Json<Value>) -> Reply {
    backend.record(&uri);
    let mut customers = backend.customers.lock().unwrap();
    if customers.iter().any(|row| row["email"] == body["email"]) {
        return message(
            StatusCode::UNPROCESSABLE_ENTITY,
            "The email has already been taken.",
        );
    }

    let mut row = body;
    row["id"] = json!(customers.len() + 1);
    row["created_at"] = json!("2024-03-01 08:00:00");
    customers.push(row.clone());
    (StatusCode::CREATED, Json(json!({ "data": row })))
}

async fn update(
    State(backend): State<Backend>,
    uri: Uri,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    backend.record(&uri);
    let mut customers = backend.customers.lock().unwrap();
    let Some(row) = customers.iter_mut().find(|row| row["id"] == id) else {
        return message(StatusCode::NOT_FOUND, "Not Found");
    };
    if let (Some(row), Some(changes)) = (row.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            row.insert(key.clone(), value.clone());
        }
    }
    (StatusCode::OK, Json(json!({ "data": row.clone() })))
}
