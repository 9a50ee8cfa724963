use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use cashback_core::config::{Config, LogFormat};
use cashback_core::{create_app, db, AppState};

const AUTO_APPROVED_CPF: &str = "15350946056";
const CPF: &str = "12345678901";

fn test_config(cashback_api_url: Option<String>) -> Config {
    Config {
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        jwt_secret: "test-secret".to_string(),
        jwt_ttl_hours: 1,
        bcrypt_cost: 4,
        auto_approved_cpfs: vec![AUTO_APPROVED_CPF.to_string()],
        cashback_api_url,
        cashback_api_token: Some("api-token".to_string()),
        log_format: LogFormat::Pretty,
    }
}

async fn setup_test_app(cashback_api_url: Option<String>) -> Router {
    let pool = db::connect_in_memory().await.unwrap();
    create_app(AppState::new(pool, &test_config(cashback_api_url)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).unwrap()
}

async fn register(app: &Router, cpf: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/api/revendedor",
            None,
            json!({
                "nome": "Joana Prado",
                "cpf": cpf,
                "email": "joana@example.com",
                "senha": "segredo"
            }),
        ),
    )
    .await
}

async fn login(app: &Router, cpf: &str) -> String {
    let (status, body) = send(
        app,
        post_json("/api/login", None, json!({ "cpf": cpf, "senha": "segredo" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create_purchase(app: &Router, token: &str, cpf: &str, code: &str, amount: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/api/compras",
            Some(token),
            json!({
                "codigo": code,
                "cpf": cpf,
                "valor": amount,
                "data": "15/03/2020"
            }),
        ),
    )
    .await
}

#[tokio::test]
async fn test_health_reports_connected_database() {
    let app = setup_test_app(None).await;

    let (status, body) = send(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["db"], "connected");
    assert!(body.get("credit_api").is_none());
}

#[tokio::test]
async fn test_health_reports_credit_api_circuit() {
    let app = setup_test_app(Some("http://127.0.0.1:9/v1/cashback".to_string())).await;

    let (status, body) = send(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credit_api"], "closed");
}

#[tokio::test]
async fn test_register_reseller_hides_password() {
    let app = setup_test_app(None).await;

    let (status, body) = register(&app, CPF).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["cpf"], CPF);
    assert_eq!(body["nome"], "Joana Prado");
    assert!(body.get("senha").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_reseller_is_conflict() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;

    let (status, body) = register(&app, CPF).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 409);
    assert_eq!(body["error"], "Já existe um revendedor cadastrado com este CPF");
}

#[tokio::test]
async fn test_register_rejects_formatted_cpf() {
    let app = setup_test_app(None).await;

    let (status, body) = register(&app, "123.456.789-01").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "CPF inválido - deve conter 11 dígitos sem pontos e traços"
    );
}

#[tokio::test]
async fn test_malformed_json_is_unprocessable() {
    let app = setup_test_app(None).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/revendedor")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;

    let token = login(&app, CPF).await;

    assert!(token.starts_with("Bearer "));
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;

    let (status, body) = send(
        &app,
        post_json("/api/login", None, json!({ "cpf": CPF, "senha": "errada" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "CPF ou senha inválidos");
}

#[tokio::test]
async fn test_login_without_password_is_unprocessable() {
    let app = setup_test_app(None).await;

    let (status, body) = send(&app, post_json("/api/login", None, json!({ "cpf": CPF }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Senha é obrigatória");
}

#[tokio::test]
async fn test_purchases_require_a_token() {
    let app = setup_test_app(None).await;

    let (status, body) = send(&app, get(&format!("/api/compras?cpf={}", CPF), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token de autorização não fornecido");

    let (status, body) = send(
        &app,
        get(&format!("/api/compras?cpf={}", CPF), Some("Bearer not-a-jwt")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token inválido");
}

#[tokio::test]
async fn test_bare_token_is_accepted() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;
    let bare = token.trim_start_matches("Bearer ");

    let (status, _) = create_purchase(&app, bare, CPF, "A-1", "10,00").await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_new_purchase_waits_for_validation() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;

    let (status, body) = create_purchase(&app, &token, CPF, "A-1", "1234,56").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["codigo"], "A-1");
    assert_eq!(body["valor"], "1234,56");
    assert_eq!(body["data"], "15/03/2020");
    assert_eq!(body["status"], "Em validação");
}

#[tokio::test]
async fn test_listed_reseller_purchase_is_approved() {
    let app = setup_test_app(None).await;
    register(&app, AUTO_APPROVED_CPF).await;
    let token = login(&app, AUTO_APPROVED_CPF).await;

    let (status, body) = create_purchase(&app, &token, AUTO_APPROVED_CPF, "B-1", "99,90").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Aprovado");
}

#[tokio::test]
async fn test_purchase_for_unknown_reseller_is_not_found() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;

    let (status, body) = create_purchase(&app, &token, "99999999999", "A-1", "10,00").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Revendedor não encontrado");
}

#[tokio::test]
async fn test_purchase_without_amount_is_unprocessable() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/compras",
            Some(&token),
            json!({ "codigo": "A-1", "cpf": CPF, "data": "15/03/2020" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Valor inválido");
}

#[tokio::test]
async fn test_purchase_with_exponent_or_negative_amount_is_rejected() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;

    for amount in ["1e999999999", "1e3", "-10,00"] {
        let (status, body) = create_purchase(&app, &token, CPF, "A-1", amount).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "amount {}", amount);
        assert_eq!(body["error"], "Valor inválido");
    }

    let (status, _) = send(&app, get(&format!("/api/compras?cpf={}", CPF), Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_purchase_list_carries_cashback_from_the_total() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;
    create_purchase(&app, &token, CPF, "A-1", "1234,56").await;
    create_purchase(&app, &token, CPF, "A-2", "543,21").await;

    let (status, body) = send(&app, get(&format!("/api/compras?cpf={}", CPF), Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    let compras = body["compras"].as_array().unwrap();
    assert_eq!(compras.len(), 2);
    assert_eq!(compras[0]["codigo"], "A-1");
    assert_eq!(compras[0]["cashback"]["percentual"], "20");
    assert_eq!(compras[0]["cashback"]["valor"], "246,91");
    assert_eq!(compras[1]["cashback"]["percentual"], "20");
    assert_eq!(compras[1]["cashback"]["valor"], "108,64");
    assert!(compras[0].get("id").is_none());
    assert!(compras[0].get("cpf").is_none());
}

#[tokio::test]
async fn test_small_history_gets_ten_percent() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;
    create_purchase(&app, &token, CPF, "A-1", "12,34").await;

    let (_, body) = send(&app, get(&format!("/api/compras?cpf={}", CPF), Some(&token))).await;

    assert_eq!(body["compras"][0]["cashback"]["percentual"], "10");
    assert_eq!(body["compras"][0]["cashback"]["valor"], "1,23");
}

#[tokio::test]
async fn test_purchase_list_errors() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;

    let (status, _) = send(&app, get("/api/compras", Some(&token))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, get(&format!("/api/compras?cpf={}", CPF), Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/api/compras?cpf=99999999999", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_credit_without_configured_api_is_unavailable() {
    let app = setup_test_app(None).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;

    let (status, body) = send(&app, get(&format!("/api/cashback?cpf={}", CPF), Some(&token))).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], 503);
}

#[tokio::test]
async fn test_credit_is_read_from_the_external_api() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/cashback")
        .match_query(mockito::Matcher::UrlEncoded("cpf".into(), CPF.into()))
        .match_header("token", "api-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"statusCode": 200, "body": {"credit": 4172}}"#)
        .create_async()
        .await;

    let app = setup_test_app(Some(format!("{}/v1/cashback", server.url()))).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;

    let (status, body) = send(&app, get(&format!("/api/cashback?cpf={}", CPF), Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["credit"], 4172);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_credit_upstream_failure_is_bad_gateway() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let app = setup_test_app(Some(server.url())).await;
    register(&app, CPF).await;
    let token = login(&app, CPF).await;

    let (status, _) = send(&app, get(&format!("/api/cashback?cpf={}", CPF), Some(&token))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
