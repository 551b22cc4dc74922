use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: u64,
    pub description: String,
    pub image: String,
}

/// `GET /products` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductList {
    pub data: Vec<Product>,
}

#[derive(Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: u64,
    pub description: String,
    pub image: String,
}

/// Partial update; an `id` in the body is ignored.
#[derive(Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<u64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    products: BTreeMap<u64, Product>,
}

impl Store {
    fn insert(&mut self, input: CreateProduct) -> Product {
        self.next_id += 1;
        let product = Product {
            id: self.next_id,
            name: input.name,
            price: input.price,
            description: input.description,
            image: input.image,
        };
        self.products.insert(product.id, product.clone());
        product
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", patch(update_product).delete(delete_product))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<ProductList> {
    let store = db.read().await;
    Json(ProductList {
        data: store.products.values().cloned().collect(),
    })
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<CreateProduct>,
) -> (StatusCode, Json<Product>) {
    let product = db.write().await.insert(input);
    tracing::info!(id = product.id, "product created");
    (StatusCode::CREATED, Json(product))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = db.write().await;
    let product = store.products.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        product.name = name;
    }
    if let Some(price) = input.price {
        product.price = price;
    }
    if let Some(description) = input.description {
        product.description = description;
    }
    if let Some(image) = input.image {
        product.image = image;
    }
    tracing::info!(id, "product updated");
    Ok(Json(product.clone()))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .products
        .remove(&id)
        .map(|_| {
            tracing::info!(id, "product deleted");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}
