//! 传输层单元测试：用脚本化的 HttpClient 驱动刷新状态机

use serde::Deserialize;

use super::*;
use crate::api::testing::{MemoryTokenStore, MockHttpClient, BASE};
use crate::error::ApiErrorKind;
use crate::web::http::RequestBody;

const EXPIRED_BODY: &str = r#"{"success":false,"message":"jwt expired"}"#;
const REFRESH_OK_BODY: &str =
    r#"{"success":true,"message":"Token refreshed","data":{"accessToken":"fresh-access"}}"#;

fn logged_in_transport() -> AuthTransport<MockHttpClient, MemoryTokenStore> {
    let tokens = MemoryTokenStore::default();
    tokens.store_pair("stale-access", "valid-refresh");
    AuthTransport::new(MockHttpClient::default(), tokens, BASE)
}

fn get(api: &AuthTransport<MockHttpClient, MemoryTokenStore>, path: &str) -> HttpRequest {
    HttpRequest::new(&api.url(path), HttpMethod::Get)
}

#[derive(Debug, Deserialize, PartialEq)]
struct Profile {
    name: String,
}

#[tokio::test]
async fn attaches_bearer_token_from_the_store() {
    let api = logged_in_transport();
    api.client
        .stub("/users/me", 200, r#"{"success":true,"data":{"name":"Ada"}}"#);

    let payload: Payload<Profile> = api.execute(get(&api, "/users/me")).await.unwrap();

    assert_eq!(payload.data, Profile { name: "Ada".into() });
    let recorded = api.client.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(
        recorded[0].header("Authorization"),
        Some("Bearer stale-access")
    );
}

#[tokio::test]
async fn anonymous_requests_carry_no_authorization_header() {
    let api = AuthTransport::new(MockHttpClient::default(), MemoryTokenStore::default(), BASE);
    api.client
        .stub("/books", 200, r#"{"success":true,"data":[]}"#);

    let _: Payload<Vec<Profile>> = api.execute(get(&api, "/books")).await.unwrap();

    assert_eq!(api.client.recorded()[0].header("Authorization"), None);
}

#[tokio::test]
async fn expired_access_token_is_refreshed_and_the_request_replayed() {
    let api = logged_in_transport();
    api.client.stub("/users/me", 401, EXPIRED_BODY);
    api.client
        .stub("/users/me", 200, r#"{"success":true,"data":{"name":"Ada"}}"#);
    api.client.stub("/auth/refresh-token", 200, REFRESH_OK_BODY);

    let payload: Payload<Profile> = api.execute(get(&api, "/users/me")).await.unwrap();
    assert_eq!(payload.data.name, "Ada");

    let recorded = api.client.recorded();
    assert_eq!(recorded.len(), 3);

    // 刷新请求带 refresh token 和空 JSON 体
    assert!(recorded[1].url.ends_with("/auth/refresh-token"));
    assert_eq!(
        recorded[1].header("Authorization"),
        Some("Bearer valid-refresh")
    );
    assert!(matches!(&recorded[1].body, RequestBody::Json(body) if body == "{}"));

    // 重放请求带新签发的 access token
    assert_eq!(
        recorded[2].header("Authorization"),
        Some("Bearer fresh-access")
    );
    assert_eq!(api.tokens().access_token().as_deref(), Some("fresh-access"));
    // 未轮换时 refresh token 原样保留
    assert_eq!(api.tokens().refresh_token().as_deref(), Some("valid-refresh"));
}

#[tokio::test]
async fn rotated_refresh_token_is_stored_alongside_the_access_token() {
    let api = logged_in_transport();
    api.client.stub("/users/me", 401, EXPIRED_BODY);
    api.client
        .stub("/users/me", 200, r#"{"success":true,"data":{"name":"Ada"}}"#);
    api.client.stub(
        "/auth/refresh-token",
        200,
        r#"{"success":true,"data":{"accessToken":"fresh-access","refreshToken":"fresh-refresh"}}"#,
    );

    let _: Payload<Profile> = api.execute(get(&api, "/users/me")).await.unwrap();

    assert_eq!(api.tokens().access_token().as_deref(), Some("fresh-access"));
    assert_eq!(api.tokens().refresh_token().as_deref(), Some("fresh-refresh"));
}

#[tokio::test]
async fn replayed_request_is_never_refreshed_twice() {
    let api = logged_in_transport();
    api.client.stub("/users/me", 401, EXPIRED_BODY);
    api.client.stub("/users/me", 401, EXPIRED_BODY);
    api.client.stub("/auth/refresh-token", 200, REFRESH_OK_BODY);

    let err = api
        .execute::<Profile>(get(&api, "/users/me"))
        .await
        .unwrap_err();

    // 重放后的 401 原样拒绝，不再进入刷新
    assert_eq!(err.kind, ApiErrorKind::Rejected);
    assert_eq!(api.client.refresh_calls(), 1);
    assert_eq!(api.client.recorded().len(), 3);
}

#[tokio::test]
async fn failed_refresh_clears_tokens_and_reports_an_expired_session() {
    let api = logged_in_transport();
    api.client.stub("/users/me", 401, EXPIRED_BODY);
    api.client.stub(
        "/auth/refresh-token",
        401,
        r#"{"success":false,"message":"jwt expired"}"#,
    );

    let err = api
        .execute::<Profile>(get(&api, "/users/me"))
        .await
        .unwrap_err();

    assert!(err.is_session_expired());
    assert_eq!(api.tokens().access_token(), None);
    assert_eq!(api.tokens().refresh_token(), None);
    // 原请求没有被重放
    assert_eq!(api.client.recorded().len(), 2);
}

#[tokio::test]
async fn a_plain_401_is_not_treated_as_expiry() {
    let api = logged_in_transport();
    api.client.stub(
        "/auth/login",
        401,
        r#"{"success":false,"message":"Invalid credentials"}"#,
    );

    let err = api
        .execute::<Profile>(get(&api, "/auth/login"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Rejected);
    assert_eq!(err.message, "Invalid credentials");
    assert_eq!(api.client.refresh_calls(), 0);
}

#[tokio::test]
async fn rejected_responses_surface_the_server_message_and_status() {
    let api = logged_in_transport();
    api.client.stub(
        "/books/missing",
        404,
        r#"{"success":false,"message":"Book not found"}"#,
    );

    let err = api
        .execute::<Profile>(get(&api, "/books/missing"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Rejected);
    assert_eq!(err.message, "Book not found");
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn an_envelope_without_data_is_a_decode_error() {
    let api = logged_in_transport();
    api.client
        .stub("/users/me", 200, r#"{"success":true,"message":"ok"}"#);

    let err = api
        .execute::<Profile>(get(&api, "/users/me"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Decode);
}

#[tokio::test]
async fn execute_empty_accepts_a_bodyless_response() {
    let api = logged_in_transport();
    api.client.stub("/reviews/42", 200, "");

    let payload = api
        .execute_empty(HttpRequest::new(
            &api.url("/reviews/42"),
            HttpMethod::Delete,
        ))
        .await
        .unwrap();

    assert_eq!(payload.message, None);
}

#[tokio::test]
async fn execute_empty_keeps_the_server_message() {
    let api = logged_in_transport();
    api.client.stub(
        "/reviews/42",
        200,
        r#"{"success":true,"message":"Review deleted successfully"}"#,
    );

    let payload = api
        .execute_empty(HttpRequest::new(
            &api.url("/reviews/42"),
            HttpMethod::Delete,
        ))
        .await
        .unwrap();

    assert_eq!(payload.message.as_deref(), Some("Review deleted successfully"));
}
