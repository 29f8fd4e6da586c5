//! Integration tests for the vestibulo relay.
//!
//! This suite verifies the relay contract end to end by:
//! 1. Standing up a wiremock upstream playing the identity service.
//! 2. Serving the real router on an ephemeral local port.
//! 3. Executing real HTTP requests against the running relay, from raw
//!    requests up through the client helpers and form flows.

use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};
use std::net::TcpListener;
use std::sync::Arc;
use url::Url;
use vestibulo::{
    api::{router, upstream::Upstream},
    client::ApiClient,
    forms::{FormPhase, HOMEPAGE_ROUTE, LOGIN_ROUTE, LoginForm, SignupForm, signup::REDIRECT_DELAY},
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Serve the relay router on an ephemeral port and return its base URL.
async fn spawn_relay(upstream_url: &str) -> Result<String> {
    let upstream = Arc::new(Upstream::new(Url::parse(upstream_url)?)?);
    let app = router(upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind relay listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app.into_make_service()).await;
    });

    Ok(format!("http://{addr}"))
}

/// Base URL of a port with nothing listening, for transport-failure cases.
fn dead_upstream() -> Result<String> {
    let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    Ok(format!("http://127.0.0.1:{port}"))
}

fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn create_user_rejects_missing_fields_without_upstream_call() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri()).await?;

    // One request per missing field, plus an empty body.
    let incomplete = [
        json!({"lastName": "L", "email": "a@b.com", "password": "secret1", "role": "admin"}),
        json!({"firstName": "A", "email": "a@b.com", "password": "secret1", "role": "admin"}),
        json!({"firstName": "A", "lastName": "L", "password": "secret1", "role": "admin"}),
        json!({"firstName": "A", "lastName": "L", "email": "a@b.com", "role": "admin"}),
        json!({"firstName": "A", "lastName": "L", "email": "a@b.com", "password": "secret1"}),
        json!({}),
    ];

    for body in incomplete {
        let response = http_client()
            .post(format!("{relay}/api/create-user"))
            .json(&body)
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 400);

        let body: Value = response.json().await?;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("All fields are required")
        );
    }

    Ok(())
}

#[tokio::test]
async fn login_rejects_missing_credentials_without_upstream_call() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri()).await?;

    for body in [
        json!({"password": "secret1"}),
        json!({"email": "x@y.com"}),
        json!({}),
    ] {
        let response = http_client()
            .post(format!("{relay}/api/login-user"))
            .json(&body)
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 400);

        let body: Value = response.json().await?;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("Email and password are required")
        );
    }

    Ok(())
}

#[tokio::test]
async fn create_user_relays_upstream_success_body_unchanged() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    let upstream_body = json!({
        "message": "Registration Successful",
        "admin": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com"
        }
    });

    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .and(body_json(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "secret1",
            "role": "admin"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(upstream_body.clone()))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri()).await?;

    let response = http_client()
        .post(format!("{relay}/api/create-user"))
        .json(&json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "secret1",
            "role": "admin"
        }))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await?;
    assert_eq!(body, upstream_body);
    Ok(())
}

#[tokio::test]
async fn create_user_relays_upstream_detail_with_status() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": "A user with this email already exists"
        })))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri()).await?;

    let response = http_client()
        .post(format!("{relay}/api/create-user"))
        .json(&json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "secret1",
            "role": "admin"
        }))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await?;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("A user with this email already exists")
    );
    Ok(())
}

#[tokio::test]
async fn create_user_falls_back_when_detail_missing() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "email": ["This field is required."]
        })))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri()).await?;

    let response = http_client()
        .post(format!("{relay}/api/create-user"))
        .json(&json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "secret1",
            "role": "admin"
        }))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await?;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("Registration failed")
    );
    Ok(())
}

#[tokio::test]
async fn login_relays_upstream_json_on_success() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .and(body_json(json!({
            "email": "x@y.com",
            "password": "secret1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc"
        })))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri()).await?;

    let response = http_client()
        .post(format!("{relay}/api/login-user"))
        .json(&json!({"email": "x@y.com", "password": "secret1"}))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({"token": "abc"}));
    Ok(())
}

#[tokio::test]
async fn login_relays_upstream_error_text_with_status() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri()).await?;

    let response = http_client()
        .post(format!("{relay}/api/login-user"))
        .json(&json!({"email": "x@y.com", "password": "secret1"}))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await?;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("Invalid credentials")
    );
    Ok(())
}

#[tokio::test]
async fn login_falls_back_when_error_body_empty() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri()).await?;

    let response = http_client()
        .post(format!("{relay}/api/login-user"))
        .json(&json!({"email": "x@y.com", "password": "secret1"}))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 503);
    let body: Value = response.json().await?;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("An error occurred during login")
    );
    Ok(())
}

#[tokio::test]
async fn unreachable_upstream_yields_500_with_message() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let relay = spawn_relay(&dead_upstream()?).await?;

    let response = http_client()
        .post(format!("{relay}/api/login-user"))
        .json(&json!({"email": "x@y.com", "password": "secret1"}))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await?;
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("expected error message"))?;
    assert!(!message.is_empty());
    Ok(())
}

#[tokio::test]
async fn health_reports_name_and_version() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;
    let relay = spawn_relay(&upstream.uri()).await?;

    let response = http_client().get(format!("{relay}/health")).send().await?;

    assert_eq!(response.status().as_u16(), 200);
    let x_app = response
        .headers()
        .get("X-App")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| anyhow!("missing X-App header"))?
        .to_string();
    assert!(x_app.starts_with("vestibulo:"));

    let body: Value = response.json().await?;
    assert_eq!(
        body.get("name").and_then(Value::as_str),
        Some("vestibulo")
    );
    assert_eq!(
        body.get("version").and_then(Value::as_str),
        Some(env!("CARGO_PKG_VERSION"))
    );
    Ok(())
}

#[tokio::test]
async fn signup_then_login_flow_end_to_end() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Registration Successful",
            "admin": {
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com"
            }
        })))
        .mount(&upstream)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc"
        })))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri()).await?;
    let api = ApiClient::new(relay).map_err(|err| anyhow!(err.to_string()))?;

    let mut signup = SignupForm::new();
    signup.set_field("firstName", "Ada");
    signup.set_field("lastName", "Lovelace");
    signup.set_field("email", "ada@example.com");
    signup.set_field("password", "secret1");
    signup.set_field("confirmPassword", "secret1");

    let redirect = signup.submit(&api).await;
    let redirect = redirect.ok_or_else(|| anyhow!("expected signup redirect"))?;
    assert_eq!(redirect.to, LOGIN_ROUTE);
    assert_eq!(redirect.after, Some(REDIRECT_DELAY));
    assert_eq!(signup.phase(), FormPhase::Succeeded);

    let mut login = LoginForm::new();
    login.email = "ada@example.com".to_string();
    login.password = "secret1".to_string();

    let redirect = login.submit(&api).await;
    let redirect = redirect.ok_or_else(|| anyhow!("expected login redirect"))?;
    assert_eq!(redirect.to, HOMEPAGE_ROUTE);
    assert_eq!(redirect.after, None);
    assert_eq!(login.phase(), FormPhase::Succeeded);
    Ok(())
}
