//! 认证资源：登录、注册、当前用户档案、登出

use web_sys::File;

use super::transport::{Payload, TokenStore};
use super::Api;
use crate::error::ApiResult;
use crate::web::http::{HttpClient, HttpMethod, HttpRequest, MultipartForm};
use bookworm_shared::protocol::{LoginPayload, RegisterPayload, TokenPair};
use bookworm_shared::User;

impl<C: HttpClient, S: TokenStore> Api<C, S> {
    /// 登录；成功后把令牌对写进存储
    pub async fn login(&self, payload: &LoginPayload) -> ApiResult<Payload<TokenPair>> {
        let request = HttpRequest::new(&self.transport.url("/auth/login"), HttpMethod::Post)
            .with_json(serde_json::to_string(payload)?);

        let tokens: Payload<TokenPair> = self.transport.execute(request).await?;
        self.transport
            .tokens()
            .store_pair(&tokens.data.access_token, &tokens.data.refresh_token);
        Ok(tokens)
    }

    /// 注册（JSON `data` 部分 + `photo` 文件部分）；成功即视为已登录
    pub async fn register(
        &self,
        payload: &RegisterPayload,
        photo: Option<File>,
    ) -> ApiResult<Payload<TokenPair>> {
        let mut form = MultipartForm::new().text("data", serde_json::to_string(payload)?);
        if let Some(file) = photo {
            form = form.file("photo", file);
        }

        let request = HttpRequest::new(&self.transport.url("/auth/register"), HttpMethod::Post)
            .with_multipart(form);

        let tokens: Payload<TokenPair> = self.transport.execute(request).await?;
        self.transport
            .tokens()
            .store_pair(&tokens.data.access_token, &tokens.data.refresh_token);
        Ok(tokens)
    }

    /// 当前登录用户的完整档案
    pub async fn my_profile(&self) -> ApiResult<User> {
        let request = HttpRequest::new(&self.transport.url("/users/me"), HttpMethod::Get);
        Ok(self.transport.execute(request).await?.data)
    }

    /// 登出：尽力通知服务器，无论成败本地令牌都清掉
    pub async fn logout(&self) {
        let request = HttpRequest::new(&self.transport.url("/auth/logout"), HttpMethod::Post);
        let _ = self.transport.execute_empty(request).await;
        self.transport.tokens().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{anonymous_api, logged_in_api};
    use crate::web::http::RequestBody;

    const LOGIN_OK: &str = r#"{"success":true,"message":"Login successful","data":{"accessToken":"issued-access","refreshToken":"issued-refresh"}}"#;

    #[tokio::test]
    async fn login_persists_the_issued_token_pair() {
        let api = anonymous_api();
        api.client().stub("/auth/login", 200, LOGIN_OK);

        let payload = LoginPayload {
            email: "ada@example.com".into(),
            password: "Secret1!".into(),
        };
        let tokens = api.login(&payload).await.unwrap();

        assert_eq!(tokens.data.access_token, "issued-access");
        assert_eq!(tokens.message.as_deref(), Some("Login successful"));
        assert_eq!(api.tokens().access_token().as_deref(), Some("issued-access"));
        assert_eq!(
            api.tokens().refresh_token().as_deref(),
            Some("issued-refresh")
        );
    }

    #[tokio::test]
    async fn failed_login_stores_nothing() {
        let api = anonymous_api();
        api.client().stub(
            "/auth/login",
            401,
            r#"{"success":false,"message":"Invalid credentials"}"#,
        );

        let payload = LoginPayload {
            email: "ada@example.com".into(),
            password: "wrong".into(),
        };
        let err = api.login(&payload).await.unwrap_err();

        assert_eq!(err.message, "Invalid credentials");
        assert_eq!(api.tokens().access_token(), None);
    }

    #[tokio::test]
    async fn register_sends_the_json_data_part() {
        let api = anonymous_api();
        api.client().stub("/auth/register", 200, LOGIN_OK);

        let payload = RegisterPayload {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "Secret1!".into(),
        };
        api.register(&payload, None).await.unwrap();

        let request = api.client().last_request();
        let RequestBody::Multipart(form) = &request.body else {
            panic!("expected a multipart body");
        };
        let data = form.text_part("data").expect("data part present");
        assert!(data.contains(r#""email":"ada@example.com""#));
        // multipart 请求不手写 Content-Type，boundary 由浏览器生成
        assert_eq!(request.header("Content-Type"), None);
        assert_eq!(api.tokens().access_token().as_deref(), Some("issued-access"));
    }

    #[tokio::test]
    async fn logout_clears_tokens_even_if_the_server_rejects() {
        let api = logged_in_api();
        api.client()
            .stub("/auth/logout", 500, r#"{"success":false}"#);

        api.logout().await;

        assert_eq!(api.tokens().access_token(), None);
        assert_eq!(api.tokens().refresh_token(), None);
    }
}
