//! 类别资源

use super::transport::{Payload, TokenStore};
use super::Api;
use crate::error::ApiResult;
use crate::web::http::{HttpClient, HttpMethod, HttpRequest};
use bookworm_shared::protocol::GenrePayload;
use bookworm_shared::Genre;

impl<C: HttpClient, S: TokenStore> Api<C, S> {
    /// 全部类别
    pub async fn list_genres(&self) -> ApiResult<Vec<Genre>> {
        let request = HttpRequest::new(&self.transport.url("/genres"), HttpMethod::Get);
        Ok(self.transport.execute(request).await?.data)
    }

    /// 新建类别
    pub async fn create_genre(&self, payload: &GenrePayload) -> ApiResult<Payload<Genre>> {
        let request = HttpRequest::new(&self.transport.url("/genres"), HttpMethod::Post)
            .with_json(serde_json::to_string(payload)?);
        self.transport.execute(request).await
    }

    /// 更新类别
    pub async fn update_genre(&self, id: &str, payload: &GenrePayload) -> ApiResult<Payload<Genre>> {
        let url = self.transport.url(&format!("/genres/{id}"));
        let request =
            HttpRequest::new(&url, HttpMethod::Put).with_json(serde_json::to_string(payload)?);
        self.transport.execute(request).await
    }

    /// 删除类别
    pub async fn delete_genre(&self, id: &str) -> ApiResult<Payload<()>> {
        let url = self.transport.url(&format!("/genres/{id}"));
        self.transport
            .execute_empty(HttpRequest::new(&url, HttpMethod::Delete))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::logged_in_api;
    use crate::web::http::HttpMethod;

    #[tokio::test]
    async fn update_genre_puts_to_the_genre_path() {
        let api = logged_in_api();
        api.client().stub(
            "/genres/g1",
            200,
            r#"{"success":true,"message":"Genre updated successfully","data":{"_id":"g1","name":"Sci-Fi","description":"Futures"}}"#,
        );

        let payload = GenrePayload {
            name: "Sci-Fi".into(),
            description: "Futures".into(),
        };
        let updated = api.update_genre("g1", &payload).await.unwrap();

        assert_eq!(updated.data.name, "Sci-Fi");
        let request = api.client().last_request();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }
}
