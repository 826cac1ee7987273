/// Integration tests for the HTTP surface: password gate, analysis and cost history
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use pricing_desk::{
    config::Config,
    server::{create_router, AppState},
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn state_with_password(password: &str) -> AppState {
    let mut config = Config::default();
    config.auth.password = password.to_string();
    AppState::new(config).await
}

async fn app_with_password(password: &str) -> Router {
    create_router(state_with_password(password).await)
}

fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("new session sets a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Log in from a fresh browser; returns the cookie pair
async fn login(app: &Router, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            None,
            json!({ "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

fn jacket_cost() -> Value {
    json!({
        "item": "Jacket",
        "fabric_price": 8000,
        "fabric_yield": 1.5,
        "lining_price": 3000,
        "lining_yield": 2.0,
        "labor": 55000,
        "trim": 5000
    })
}

fn shirt_request() -> Value {
    json!({
        "products": [
            { "source": "manual", "name": "Shirt", "cost": 18000, "prices": [39000] }
        ],
        "discounts": [0, 30]
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app_with_password("desk-2026").await;
    let response = app.oneshot(get_request("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_gated_routes_require_login() {
    let app = app_with_password("desk-2026").await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/analyze", None, shirt_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "unauthorized");

    let response = app
        .clone()
        .oneshot(get_request("/api/catalog", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_index_shows_login_form_until_authenticated() {
    let app = app_with_password("desk-2026").await;

    let response = app.clone().oneshot(get_request("/", None)).await.unwrap();
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let html = body_text(response).await;
    assert!(html.contains("type=\"password\""));
    assert!(!html.contains("id=\"analyze\""));

    let cookie = login(&app, "desk-2026").await;

    let response = app
        .clone()
        .oneshot(get_request("/", Some(&cookie)))
        .await
        .unwrap();
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let html = body_text(response).await;
    assert!(html.contains("id=\"analyze\""));
    assert!(html.contains("[DESK] OFFICE SHIRT [FOG]"));
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let state = state_with_password("desk-2026").await;
    let app = create_router(state.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            None,
            json!({ "password": "desk-2025" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert!(state.sessions.is_empty());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/analyze", None, shirt_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejected_requests_do_not_store_sessions() {
    let state = state_with_password("desk-2026").await;
    let app = create_router(state.clone());

    for _ in 0..200 {
        let response = app
            .clone()
            .oneshot(get_request("/api/catalog", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    for _ in 0..50 {
        app.clone().oneshot(get_request("/", None)).await.unwrap();
    }
    assert_eq!(state.sessions.len(), 0);

    login(&app, "desk-2026").await;
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_analyze_json_after_login() {
    let app = app_with_password("desk-2026").await;
    let cookie = login(&app, "desk-2026").await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/analyze", Some(&cookie), shirt_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["discounts"], json!([0.0, 30.0]));

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["fee_note"], "Fee 28%");
    assert_eq!(rows[0]["sell_price"].as_f64().unwrap(), 39000.0);
    assert!((rows[0]["profit"].as_f64().unwrap() - 10080.0).abs() < 1e-6);
    assert!((rows[0]["margin_pct"].as_f64().unwrap() - 25.846).abs() < 0.01);
    assert_eq!(rows[0]["band"], "fair");

    assert_eq!(rows[1]["fee_note"], "Fee 25%");
    assert!((rows[1]["sell_price"].as_f64().unwrap() - 27300.0).abs() < 1e-6);
    assert!((rows[1]["profit"].as_f64().unwrap() - 2475.0).abs() < 1e-6);
    assert_eq!(rows[1]["band"], "loss");
}

#[tokio::test]
async fn test_analyze_html_fragment() {
    let app = app_with_password("").await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/analyze", None, shirt_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<table class=\"results\">"));
    assert!(html.contains("27,300"));
}

#[tokio::test]
async fn test_malformed_json_gets_error_envelope() {
    let app = app_with_password("").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"products\": [{\"source\": \"manual\", \"cost\": \"lots\"}"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "validation_error");
    assert!(body["error"]["message"].is_string());

    // Missing item name reaches the estimator's own validation
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cost",
            None,
            json!({ "fabric_price": 8000, "fabric_yield": 1.5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Enter an item name");
}

#[tokio::test]
async fn test_analyze_validation_error() {
    let app = app_with_password("").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/analyze",
            None,
            json!({
                "products": [{ "source": "manual", "name": "Shirt", "prices": [39000] }],
                "discounts": []
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/analyze",
            None,
            json!({
                "products": [{ "source": "catalog", "name": "No such product" }],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_search() {
    let app = app_with_password("").await;

    let response = app
        .oneshot(get_request("/api/catalog?q=chino%20pants", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 27);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 6);
    assert!(body.get("load_error").is_none());
}

#[tokio::test]
async fn test_cost_history_per_session() {
    let app = app_with_password("").await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/cost", None, jacket_cost()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let record = body_json(response).await;
    assert_eq!(record["subtotal"].as_f64().unwrap(), 78000.0);
    assert_eq!(record["final_cost"].as_f64().unwrap(), 85800.0);

    let response = app
        .clone()
        .oneshot(get_request("/api/cost/history", Some(&cookie)))
        .await
        .unwrap();
    let history = body_json(response).await;
    assert_eq!(history.as_array().unwrap().len(), 1);

    // Another browser has its own empty history
    let response = app
        .clone()
        .oneshot(get_request("/api/cost/history", None))
        .await
        .unwrap();
    let other = body_json(response).await;
    assert!(other.as_array().unwrap().is_empty());

    let response = app
        .clone()
        .oneshot(get_request("/api/cost/history.csv", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("attachment"));
    let csv = body_text(response).await;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "timestamp,item,fabric_price,fabric_yield,fabric_total,lining_price,lining_yield,lining_total,labor,trim,subtotal,final_cost"
    );
    assert!(lines.next().unwrap().contains(",Jacket,"));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/cost/history")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request("/api/cost/history", Some(&cookie)))
        .await
        .unwrap();
    let history = body_json(response).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cost_validation_error() {
    let app = app_with_password("").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/cost",
            None,
            json!({ "item": "Jacket", "fabric_price": 8000 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_clears_login() {
    let app = app_with_password("desk-2026").await;
    let cookie = login(&app, "desk-2026").await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/logout", Some(&cookie), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request("/api/cost/history", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_catalog_reload_reports_broken_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "name,cost,price,discount\nShirt,18000,39000,10\n").unwrap();

    let mut config = Config::default();
    config.catalog.path = Some(file.path().to_path_buf());
    let app = create_router(AppState::new(config).await);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/catalog/reload", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["total"], 1);

    std::fs::write(file.path(), "name,cost,price,discount\nShirt,18000,39000,150\n").unwrap();
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/catalog/reload", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "catalog_error");

    let response = app
        .clone()
        .oneshot(get_request("/api/catalog", None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
    assert!(body["load_error"].as_str().unwrap().contains("discount"));
}
