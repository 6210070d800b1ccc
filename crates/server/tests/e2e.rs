use std::net::SocketAddr;

use configs::AuthConfig;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use server::{auth::Claims, build_router, AppState};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

const SECRET: &str = "e2e-secret";

struct TestApp {
    base_url: String,
    token: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    let state = AppState::new(db, AuthConfig { jwt_secret: SECRET.into() });
    let app = build_router(state, CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    let claims = Claims { username: Some("e2e".into()), sub: None, exp: None };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes()))?;
    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()), token })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_expedition_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();
    let base = format!("{}/v1/master/expeditions", app.base_url);

    let res = client
        .post(&base)
        .bearer_auth(&app.token)
        .header("x-timezone-offset", "-5")
        .json(&json!({ "code": "JNE", "name": "Jalur Nugraha" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let id = res.json::<Value>().await?["data"].as_i64().expect("created id");

    let res = client.get(format!("{base}/code?code=JNE")).bearer_auth(&app.token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["_id"], id);
    assert_eq!(body["data"]["_timezoneOffset"], -5);

    let res = client
        .put(format!("{base}/{id}"))
        .bearer_auth(&app.token)
        .json(&json!({ "_id": id + 1, "code": "JNE", "name": "JNE Express" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = client.delete(format!("{base}/{id}")).bearer_auth(&app.token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = client.get(format!("{base}/code?code=JNE")).bearer_auth(&app.token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
