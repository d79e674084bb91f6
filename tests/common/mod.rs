#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use serde_json::{json, Value};
use std::sync::Arc;

use taskboard::auth::SESSION_COOKIE;
use taskboard::config::Config;
use taskboard::store::MemoryStore;
use taskboard::AppState;

pub const SECRET: &str = "integration-secret";

/// Fresh state over an empty in-memory store. The minimum bcrypt cost keeps
/// registration fast.
pub fn state() -> AppState {
    let mut config = Config::new(SECRET);
    config.bcrypt_cost = 4;
    AppState::new(Arc::new(MemoryStore::new()), config)
}

pub fn session_of<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

pub async fn register<S, B>(app: &S, username: &str, email: &str, password: &str) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    (status, test::read_body_json(resp).await)
}

/// Registers and logs in, returning the session cookie.
pub async fn sign_up<S, B>(app: &S, username: &str, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = register(app, username, email, password).await;
    assert_eq!(status, 201, "registration failed: {}", body);

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    session_of(&resp).expect("login sets the session cookie")
}

/// Sends `req` with an optional session cookie and JSON body; returns status and body.
pub async fn send<S, B>(
    app: &S,
    req: test::TestRequest,
    session: Option<&Cookie<'static>>,
    body: Option<Value>,
) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut req = req;
    if let Some(cookie) = session {
        req = req.cookie(cookie.clone());
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    (status, test::read_body_json(resp).await)
}

pub async fn create_task<S, B>(app: &S, session: &Cookie<'static>, body: Value) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        test::TestRequest::post().uri("/api/v1/tasks"),
        Some(session),
        Some(body),
    )
    .await;
    assert_eq!(status, 200, "create failed: {}", body);
    body["task"].clone()
}
