//! Drives `HttpCatalogueRemote` against an in-process axum server that plays
//! the inventory API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use inventory_admin::confirm::{ConfirmationGate, Decision, DeleteCategory, Resolution};
use inventory_admin::models::{Category, CategoryName, Item, NewCategory, SpreadsheetFile};
use inventory_admin::{CatalogueError, CatalogueRemote, CatalogueStore, HttpCatalogueRemote};

#[derive(Debug, Clone)]
struct Upload {
    field: String,
    file_name: Option<String>,
    content_type: Option<String>,
    size: usize,
}

#[derive(Clone, Default)]
struct Authority {
    categories: Arc<Mutex<Vec<Category>>>,
    deleted_items: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    uploads: Arc<Mutex<Vec<Upload>>>,
}

fn error(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn list(State(auth): State<Authority>) -> Json<Vec<Category>> {
    Json(auth.categories.lock().unwrap().clone())
}

async fn create(State(auth): State<Authority>, Json(body): Json<Value>) -> Response {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let items: Vec<Item> = serde_json::from_value(body["items"].clone()).unwrap_or_default();

    let mut categories = auth.categories.lock().unwrap();
    if categories.iter().any(|c| c.name == name) {
        return error(StatusCode::BAD_REQUEST, "Category already exists".to_string());
    }
    let category = Category {
        id: format!("c{}", categories.len() + 1),
        name,
        items,
    };
    categories.push(category.clone());
    (StatusCode::CREATED, Json(category)).into_response()
}

async fn remove(State(auth): State<Authority>, Path(name): Path<String>) -> Response {
    let mut categories = auth.categories.lock().unwrap();
    let before = categories.len();
    categories.retain(|c| c.name != name);
    if categories.len() == before {
        return error(StatusCode::NOT_FOUND, format!("Category {} not found", name));
    }
    Json(json!({ "message": "Category deleted" })).into_response()
}

async fn remove_items(
    State(auth): State<Authority>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let items: Vec<String> =
        serde_json::from_value(body["itemsToDelete"].clone()).unwrap_or_default();
    let mut categories = auth.categories.lock().unwrap();
    let Some(category) = categories.iter_mut().find(|c| c.name == name) else {
        return error(StatusCode::NOT_FOUND, format!("Category {} not found", name));
    };
    category.items.retain(|item| !items.contains(&item.name));
    auth.deleted_items.lock().unwrap().push((name, items));
    Json(json!({ "message": "Items deleted" })).into_response()
}

async fn upload(State(auth): State<Authority>, mut multipart: Multipart) -> Response {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let upload = Upload {
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            size: 0,
        };
        let bytes = field.bytes().await.unwrap();
        auth.uploads.lock().unwrap().push(Upload {
            size: bytes.len(),
            ..upload
        });
    }
    Json(json!({
        "message": "File processed",
        "stats": { "categoriesProcessed": 2, "itemsProcessed": 5 }
    }))
    .into_response()
}

fn router(auth: Authority) -> Router {
    Router::new()
        .route("/api/categories", get(list).post(create))
        .route("/api/categories/excel-upload", post(upload))
        .route("/api/categories/{name}", delete(remove))
        .route("/api/categories/{name}/delete-items", post(remove_items))
        .with_state(auth)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}/api", addr)
}

async fn authority_with(categories: Vec<Category>) -> (Authority, HttpCatalogueRemote) {
    let auth = Authority::default();
    *auth.categories.lock().unwrap() = categories;
    let url = serve(router(auth.clone())).await;
    let remote = HttpCatalogueRemote::new(url, Duration::from_secs(5)).unwrap();
    (auth, remote)
}

fn dairy() -> Category {
    Category {
        id: "c1".to_string(),
        name: "Dairy".to_string(),
        items: vec![Item::new("Milk", "ltr"), Item::new("Cheese", "gm")],
    }
}

#[tokio::test]
async fn test_list_categories() {
    let (_, remote) = authority_with(vec![dairy()]).await;
    let categories = remote.list_categories().await.unwrap();
    assert_eq!(categories, vec![dairy()]);
}

#[tokio::test]
async fn test_create_category_posts_name_and_items() {
    let (auth, remote) = authority_with(vec![]).await;
    let request = NewCategory::validate("Bakery", &[Item::new("Bread", "pc")]).unwrap();
    assert_eq!(request.name, CategoryName::Bakery);

    let created = remote.create_category(&request).await.unwrap();
    assert_eq!(created.name, "Bakery");
    assert_eq!(created.items, vec![Item::new("Bread", "pc")]);
    assert_eq!(auth.categories.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_duplicate_surfaces_server_message() {
    let (_, remote) = authority_with(vec![dairy()]).await;
    let request = NewCategory::validate("Dairy", &[Item::new("Butter", "gm")]).unwrap();

    let err = remote.create_category(&request).await.unwrap_err();
    assert!(matches!(err, CatalogueError::Server { status: 400, .. }));
    assert_eq!(err.to_string(), "Category already exists");
}

#[tokio::test]
async fn test_delete_category() {
    let (auth, remote) = authority_with(vec![dairy()]).await;
    remote.delete_category("Dairy").await.unwrap();
    assert!(auth.categories.lock().unwrap().is_empty());

    let err = remote.delete_category("Dairy").await.unwrap_err();
    assert_eq!(err.to_string(), "Category Dairy not found");
}

#[tokio::test]
async fn test_delete_category_encodes_name() {
    let mut odd = dairy();
    odd.name = "Dry Goods".to_string();
    let (auth, remote) = authority_with(vec![odd]).await;

    remote.delete_category("Dry Goods").await.unwrap();
    assert!(auth.categories.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_items_sends_items_to_delete() {
    let (auth, remote) = authority_with(vec![dairy()]).await;
    remote
        .delete_items("Dairy", &["Milk".to_string()])
        .await
        .unwrap();

    assert_eq!(
        auth.deleted_items.lock().unwrap().clone(),
        vec![("Dairy".to_string(), vec!["Milk".to_string()])]
    );
    let categories = remote.list_categories().await.unwrap();
    assert_eq!(categories[0].items, vec![Item::new("Cheese", "gm")]);
}

#[tokio::test]
async fn test_excel_upload_sends_multipart_file_field() {
    let (auth, remote) = authority_with(vec![]).await;
    let file = SpreadsheetFile::new(
        "stock.xlsx",
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string()),
        vec![0u8; 2048],
    );

    let stats = remote.import_spreadsheet(&file).await.unwrap();
    assert_eq!(stats.categories_processed, 2);
    assert_eq!(stats.items_processed, 5);

    let uploads = auth.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].field, "file");
    assert_eq!(uploads[0].file_name.as_deref(), Some("stock.xlsx"));
    assert_eq!(
        uploads[0].content_type.as_deref(),
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    );
    assert_eq!(uploads[0].size, 2048);
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_generic_message() {
    let app = Router::new().route(
        "/api/categories",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
    );
    let url = serve(app).await;
    let remote = HttpCatalogueRemote::new(url, Duration::from_secs(5)).unwrap();

    let err = remote.list_categories().await.unwrap_err();
    assert!(matches!(err, CatalogueError::Server { status: 500, message: None, .. }));
    assert_eq!(err.to_string(), "Failed to fetch categories");
}

#[tokio::test]
async fn test_error_in_success_body_surfaces_server_message() {
    let app = Router::new().route(
        "/api/categories",
        post(|| async { Json(json!({ "error": "Invalid unit for Milk" })) }),
    );
    let url = serve(app).await;
    let remote = HttpCatalogueRemote::new(url, Duration::from_secs(5)).unwrap();
    let request = NewCategory::validate("Dairy", &[Item::new("Milk", "ltr")]).unwrap();

    let err = remote.create_category(&request).await.unwrap_err();
    assert!(matches!(err, CatalogueError::Server { status: 200, .. }));
    assert_eq!(err.to_string(), "Invalid unit for Milk");
}

#[tokio::test]
async fn test_unreachable_authority_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let remote =
        HttpCatalogueRemote::new(format!("http://{}/api", addr), Duration::from_secs(2)).unwrap();
    let err = remote.list_categories().await.unwrap_err();
    assert!(matches!(err, CatalogueError::Network { .. }));
    assert_eq!(err.to_string(), "Failed to fetch categories");
}

#[tokio::test]
async fn test_store_round_trip_over_http() {
    let (auth, remote) = authority_with(vec![dairy()]).await;
    let store = CatalogueStore::new(Arc::new(remote));

    store.refresh().await.unwrap();
    assert_eq!(store.active_tab().as_deref(), Some("Dairy"));

    store
        .create_category("fruits", &[Item::new("Apple", "kg")])
        .await
        .unwrap();
    assert_eq!(store.categories().len(), 2);
    assert_eq!(store.active_tab().as_deref(), Some("Fruits"));

    let mut gate = ConfirmationGate::new();
    let token = gate.request(DeleteCategory {
        name: "Dairy".to_string(),
    });
    let Resolution::Confirmed(confirmed) = gate.resolve(token, Decision::Confirmed) else {
        panic!("expected confirmation");
    };
    store.delete_category(confirmed).await.unwrap();

    let names: Vec<String> = auth
        .categories
        .lock()
        .unwrap()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(names, vec!["Fruits".to_string()]);
    assert_eq!(store.categories().len(), 1);
}
