//! 书架资源

use super::transport::{Payload, TokenStore};
use super::Api;
use crate::error::ApiResult;
use crate::web::http::{HttpClient, HttpMethod, HttpRequest};
use bookworm_shared::protocol::TogglePayload;
use bookworm_shared::Shelve;

impl<C: HttpClient, S: TokenStore> Api<C, S> {
    /// 当前用户的全部书架记录
    pub async fn my_shelves(&self) -> ApiResult<Vec<Shelve>> {
        let request =
            HttpRequest::new(&self.transport.url("/shelves/my-shelves"), HttpMethod::Get);
        Ok(self.transport.execute(request).await?.data)
    }

    /// 上架/移架/下架循环切换；返回的 message 描述落在了哪一步
    pub async fn toggle_shelve(&self, payload: &TogglePayload) -> ApiResult<Payload<()>> {
        let request =
            HttpRequest::new(&self.transport.url("/shelves/toggle-shelve"), HttpMethod::Post)
                .with_json(serde_json::to_string(payload)?);
        self.transport.execute_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::logged_in_api;
    use crate::web::http::RequestBody;

    #[tokio::test]
    async fn toggle_posts_the_user_and_book_ids() {
        let api = logged_in_api();
        api.client().stub(
            "/shelves/toggle-shelve",
            200,
            r#"{"success":true,"message":"Book added to WANT_TO_READ"}"#,
        );

        let payload = TogglePayload {
            user: "u1".into(),
            book: "b1".into(),
        };
        let result = api.toggle_shelve(&payload).await.unwrap();

        assert_eq!(result.message.as_deref(), Some("Book added to WANT_TO_READ"));
        let request = api.client().last_request();
        let RequestBody::Json(body) = &request.body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body, r#"{"user":"u1","book":"b1"}"#);
    }
}
