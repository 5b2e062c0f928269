use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use routina_core::product::{CatalogSource, CatalogState, CatalogStore, ProductId};
use routina_core::{KeyValueStore, SelectionPersistence, SelectionSet};
use routina_infrastructure::{HttpCatalogSource, JsonFileKeyValueStore, catalog_source_for};
use tempfile::TempDir;
use tokio::net::TcpListener;

const CATALOG: &str = r#"{
  "products": [
    {"id": 1, "name": "Gentle Foaming Cleanser", "brand": "CeraVe", "category": "cleanser", "image": "a.png", "description": "Daily cleanser"},
    {"id": 2, "name": "Vitamin C Serum", "brand": "Lumi", "category": "serum", "image": "b.png"},
    {"id": "spf-30", "name": "Daily Sunscreen", "brand": "Sola", "category": "suncare", "image": "c.png", "rating": 4.5}
  ]
}"#;

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_http_source_loads_catalog() {
    let addr = serve(Router::new().route("/products.json", get(|| async { CATALOG }))).await;
    let source = HttpCatalogSource::new(format!("http://{addr}/products.json"));

    let mut store = CatalogStore::new();
    assert_eq!(store.load(&source).await, CatalogState::Loaded);
    assert_eq!(store.catalog().len(), 3);

    let sunscreen = store
        .catalog()
        .get(&ProductId::from("spf-30"))
        .expect("string id present");
    assert_eq!(sunscreen.extra.get("rating"), Some(&serde_json::json!(4.5)));
}

#[tokio::test]
async fn test_http_source_with_bad_body_leaves_store_empty() {
    let app = Router::new().route("/products.json", get(|| async { "<html>oops</html>" }));
    let addr = serve(app).await;
    let source = catalog_source_for(&format!("http://{addr}/products.json"));

    let mut store = CatalogStore::new();
    assert_eq!(store.load(source.as_ref()).await, CatalogState::Failed);
    assert!(store.catalog().is_empty());
}

#[tokio::test]
async fn test_file_source_and_persisted_selection_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("products.json");
    std::fs::write(&catalog_path, CATALOG).unwrap();
    let storage_path = temp_dir.path().join("storage.json");

    let source = catalog_source_for(catalog_path.to_str().unwrap());
    let mut store = CatalogStore::new();
    store.load(source.as_ref()).await;

    {
        let kv = JsonFileKeyValueStore::open(storage_path.clone()).unwrap();
        let persistence = SelectionPersistence::new(Arc::new(kv));
        let mut selection = SelectionSet::new();
        for id in [ProductId::from(2), ProductId::from("spf-30")] {
            let product = store.catalog().get(&id).unwrap().clone();
            selection.toggle(&product);
        }
        persistence.save(&selection.serialize().unwrap()).unwrap();
    }

    let kv = JsonFileKeyValueStore::open(storage_path.clone()).unwrap();
    assert!(kv.get("selectedProducts").unwrap().is_some());

    let persistence = SelectionPersistence::new(Arc::new(kv));
    let mut restored = SelectionSet::new();
    let saved = persistence.load().unwrap().expect("selection saved");
    restored.restore(&saved).unwrap();
    assert_eq!(
        restored.ids(),
        vec![&ProductId::from(2), &ProductId::from("spf-30")]
    );
    assert_eq!(source.describe(), catalog_path.display().to_string());
}
