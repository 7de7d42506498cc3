//! 用户资源（后台管理）

use super::transport::{Payload, TokenStore};
use super::Api;
use crate::error::ApiResult;
use crate::web::http::{HttpClient, HttpMethod, HttpRequest};
use bookworm_shared::protocol::RolePayload;
use bookworm_shared::{Role, User};

impl<C: HttpClient, S: TokenStore> Api<C, S> {
    /// 全部用户
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        let request = HttpRequest::new(&self.transport.url("/users"), HttpMethod::Get);
        Ok(self.transport.execute(request).await?.data)
    }

    /// 调整用户角色（提升为管理员 / 降回普通用户）
    pub async fn update_user_role(&self, id: &str, role: Role) -> ApiResult<Payload<User>> {
        let url = self.transport.url(&format!("/users/{id}"));
        let payload = RolePayload { role };
        let request =
            HttpRequest::new(&url, HttpMethod::Patch).with_json(serde_json::to_string(&payload)?);
        self.transport.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::logged_in_api;
    use crate::web::http::RequestBody;

    #[tokio::test]
    async fn role_change_patches_the_user_path() {
        let api = logged_in_api();
        api.client().stub(
            "/users/u1",
            200,
            r#"{"success":true,"message":"User role updated","data":{"_id":"u1","name":"Ada","email":"ada@example.com","role":"ADMIN","createdAt":"2026-01-15T10:00:00Z"}}"#,
        );

        let updated = api.update_user_role("u1", Role::Admin).await.unwrap();

        assert_eq!(updated.data.role, Role::Admin);
        let request = api.client().last_request();
        assert_eq!(request.method, HttpMethod::Patch);
        let RequestBody::Json(body) = &request.body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body, r#"{"role":"ADMIN"}"#);
    }
}
