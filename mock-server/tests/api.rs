use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Product, ProductList};
use tower::ServiceExt;

const PEN: &str = r#"{"name":"Pen","price":1500,"description":"Blue ink","image":"pen.png"}"#;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_products_empty_envelope() {
    let resp = app()
        .oneshot(empty_request("GET", "/products"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: ProductList = body_json(resp).await;
    assert!(list.data.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_product_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request("POST", "/products", PEN))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Product = body_json(resp).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Pen");
    assert_eq!(product.price, 1500);
}

#[tokio::test]
async fn create_product_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/products", r#"{"name":"Pen"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_product_string_price_returns_422() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/products",
            r#"{"name":"Pen","price":"abc","description":"d","image":"i"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_product_not_found() {
    let resp = app()
        .oneshot(json_request("PATCH", "/products/1", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_product_bad_id_returns_400() {
    let resp = app()
        .oneshot(json_request("PATCH", "/products/abc", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_product_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/products/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/products", PEN))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Product = body_json(resp).await;
    let id = created.id;

    // list contains the one product
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/products"))
        .await
        .unwrap();
    let list: ProductList = body_json(resp).await;
    assert_eq!(list.data, vec![created.clone()]);

    // patch with the full field set plus an id in the body
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PATCH",
            &format!("/products/{id}"),
            r#"{"id":"1","name":"Pencil","price":900,"description":"Blue ink","image":"pen.png"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Product = body_json(resp).await;
    assert_eq!(updated.id, id);
    assert_eq!(updated.name, "Pencil");
    assert_eq!(updated.price, 900);

    // partial patch keeps the rest
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PATCH",
            &format!("/products/{id}"),
            r#"{"image":"pencil.png"}"#,
        ))
        .await
        .unwrap();
    let updated: Product = body_json(resp).await;
    assert_eq!(updated.name, "Pencil");
    assert_eq!(updated.image, "pencil.png");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete again is 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list is empty again
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/products"))
        .await
        .unwrap();
    let list: ProductList = body_json(resp).await;
    assert!(list.data.is_empty());
}
