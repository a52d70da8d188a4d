use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rust_decimal_macros::dec;
use storefront_core::catalog::{CategorySpecGroup, NewCategory, NewSpecGroup};
use storefront_core::products::{NewProduct, ProductTranslation};
use storefront_server::{api::app_router, build_state, config::Config, AppState};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn build_test_app(dir: &TempDir) -> (Arc<AppState>, Router) {
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        jwt_secret: None,
        token_ttl: Duration::from_secs(3600),
        admin_email: None,
        admin_password_hash: None,
    };
    let state = build_state(&config).await.unwrap();
    let app = app_router(state.clone(), &config);
    (state, app)
}

async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, header::HeaderMap, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, headers, json)
}

async fn seed_product(state: &AppState, price: rust_decimal::Decimal) -> (String, String) {
    let category = state
        .category_service
        .create_category(NewCategory {
            name: "Phones".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let product = state
        .product_service
        .create_product(NewProduct {
            id: None,
            category_id: category.id.clone(),
            slug: None,
            price,
            image_url: None,
            stock: 10,
            is_active: true,
            specifications: Default::default(),
            translations: vec![ProductTranslation {
                product_id: String::new(),
                language_code: "en".to_string(),
                name: "Pixel Nine".to_string(),
                description: None,
            }],
        })
        .await
        .unwrap();
    (category.id, product.id)
}

#[tokio::test]
async fn healthz_works() {
    let dir = tempdir().unwrap();
    let (_, app) = build_test_app(&dir).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn category_specs_include_ancestor_groups() {
    let dir = tempdir().unwrap();
    let (state, app) = build_test_app(&dir).await;
    let catalog = &state.category_service;

    let root = catalog
        .create_category(NewCategory {
            name: "Electronics".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let leaf = catalog
        .create_category(NewCategory {
            name: "Laptops".to_string(),
            parent_id: Some(root.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    for (category_id, title, specs) in [
        (&root.id, "General", vec!["Brand", "Model"]),
        (&leaf.id, "Display", vec!["Size"]),
    ] {
        let group = catalog
            .create_spec_group(NewSpecGroup {
                title: title.to_string(),
                specs: specs.into_iter().map(String::from).collect(),
                ..Default::default()
            })
            .await
            .unwrap();
        catalog
            .attach_spec_group(CategorySpecGroup {
                category_id: category_id.clone(),
                spec_group_id: group.id,
                sort_order: 0,
            })
            .await
            .unwrap();
    }

    let uri = format!("/api/v1/categories/{}/specs", leaf.id);
    let (status, _, body) = request(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["General", "Display"]);

    let (status, _, body) =
        request(&app, Method::GET, "/api/v1/categories/missing/specs", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);

    let (status, _, tree) = request(&app, Method::GET, "/api/v1/categories/tree", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tree[0]["children"][0]["name"], "Laptops");
}

#[tokio::test]
async fn currency_cookie_converts_prices() {
    let dir = tempdir().unwrap();
    let (state, app) = build_test_app(&dir).await;
    let (_, product_id) = seed_product(&state, dec!(108)).await;

    let (status, _, current) = request(&app, Method::GET, "/api/v1/currency", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["code"], "USD");

    let (status, _, _) = request(
        &app,
        Method::PUT,
        "/api/v1/currency",
        None,
        Some(serde_json::json!({ "code": "XXX" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, headers, selected) = request(
        &app,
        Method::PUT,
        "/api/v1/currency",
        None,
        Some(serde_json::json!({ "code": "eur" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(selected["code"], "EUR");
    let set_cookie = headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("currency="));
    assert!(set_cookie.contains("Max-Age=2592000"));
    assert!(set_cookie.contains("SameSite=Lax"));
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let (status, _, current) =
        request(&app, Method::GET, "/api/v1/currency", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["code"], "EUR");

    let (status, _, page) =
        request(&app, Method::GET, "/api/v1/products", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    let item = &page["items"][0];
    assert_eq!(item["id"], product_id.as_str());
    assert_eq!(item["currency"], "EUR");
    assert_eq!(item["price"].as_f64(), Some(108.0));
    assert_eq!(item["displayPrice"].as_f64(), Some(100.0));

    // A cookie that does not parse falls back to the default currency.
    let (_, _, page) = request(
        &app,
        Method::GET,
        "/api/v1/products",
        Some("currency=garbage"),
        None,
    )
    .await;
    assert_eq!(page["items"][0]["currency"], "USD");
    assert_eq!(page["items"][0]["displayPrice"].as_f64(), Some(108.0));

    let uri = "/api/v1/products/pixel-nine?lang=fr";
    let (status, _, detail) = request(&app, Method::GET, uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["name"], "Pixel Nine");
    assert_eq!(detail["displayPrice"].as_f64(), Some(100.0));
}

#[tokio::test]
async fn cart_is_reduced_and_priced_server_side() {
    let dir = tempdir().unwrap();
    let (state, app) = build_test_app(&dir).await;
    let (_, product_id) = seed_product(&state, dec!(108)).await;

    let add = serde_json::json!({
        "cart": { "items": [] },
        "action": { "type": "add", "productId": product_id, "quantity": 2 }
    });
    let (status, _, cart) = request(&app, Method::POST, "/api/v1/cart/apply", None, Some(add)).await;
    assert_eq!(status, StatusCode::OK);
    let add_again = serde_json::json!({
        "cart": cart,
        "action": { "type": "add", "productId": product_id, "quantity": 1 }
    });
    let (_, _, cart) =
        request(&app, Method::POST, "/api/v1/cart/apply", None, Some(add_again)).await;
    assert_eq!(cart["items"][0]["quantity"], 3);

    let zero = serde_json::json!({
        "cart": cart,
        "action": { "type": "add", "productId": product_id, "quantity": 0 }
    });
    let (status, _, _) = request(&app, Method::POST, "/api/v1/cart/apply", None, Some(zero)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, headers, _) = request(
        &app,
        Method::PUT,
        "/api/v1/currency",
        None,
        Some(serde_json::json!({ "code": "EUR" })),
    )
    .await;
    let cookie = headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let body = serde_json::json!({
        "items": [
            { "productId": product_id, "quantity": 3 },
            { "productId": "discontinued", "quantity": 1 }
        ]
    });
    let (status, _, summary) = request(
        &app,
        Method::POST,
        "/api/v1/cart/summary",
        Some(&cookie),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["itemCount"], 3);
    assert_eq!(summary["currency"], "EUR");
    assert_eq!(summary["subtotal"].as_f64(), Some(324.0));
    assert_eq!(summary["displaySubtotal"].as_f64(), Some(300.0));
    assert_eq!(summary["unavailable"][0], "discontinued");
}

#[tokio::test]
async fn client_carts_are_normalized() {
    let dir = tempdir().unwrap();
    let (state, app) = build_test_app(&dir).await;
    let (_, product_id) = seed_product(&state, dec!(10)).await;

    let body = serde_json::json!({
        "items": [
            { "productId": product_id, "quantity": 1 },
            { "productId": product_id, "quantity": 2 }
        ]
    });
    let (status, _, summary) =
        request(&app, Method::POST, "/api/v1/cart/summary", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["lines"].as_array().unwrap().len(), 1);
    assert_eq!(summary["lines"][0]["quantity"], 3);
    assert_eq!(summary["subtotal"].as_f64(), Some(30.0));
    assert!(summary["unavailable"].as_array().unwrap().is_empty());

    let body = serde_json::json!({
        "items": [
            { "productId": product_id, "quantity": u32::MAX },
            { "productId": "discontinued", "quantity": 2 }
        ]
    });
    let (status, _, summary) =
        request(&app, Method::POST, "/api/v1/cart/summary", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["itemCount"], 99);
    assert_eq!(summary["subtotal"].as_f64(), Some(990.0));

    let apply = serde_json::json!({
        "cart": { "items": [
            { "productId": product_id, "quantity": 60 },
            { "productId": product_id, "quantity": 60 }
        ] },
        "action": { "type": "add", "productId": "other", "quantity": 1 }
    });
    let (status, _, cart) =
        request(&app, Method::POST, "/api/v1/cart/apply", None, Some(apply)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
    assert_eq!(cart["items"][0]["quantity"], 99);
}

#[tokio::test]
async fn huge_product_page_is_empty() {
    let dir = tempdir().unwrap();
    let (state, app) = build_test_app(&dir).await;
    seed_product(&state, dec!(10)).await;

    let uri = format!("/api/v1/products?page={}", i64::MAX);
    let (status, _, page) = request(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert!(page["items"].as_array().unwrap().is_empty());
}
