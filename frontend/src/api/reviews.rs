//! 评论资源

use super::transport::{Payload, TokenStore};
use super::Api;
use crate::error::ApiResult;
use crate::web::http::{HttpClient, HttpMethod, HttpRequest};
use bookworm_shared::protocol::ReviewPayload;
use bookworm_shared::Review;

impl<C: HttpClient, S: TokenStore> Api<C, S> {
    /// 全部评论（后台审核列表）
    pub async fn list_reviews(&self) -> ApiResult<Vec<Review>> {
        let request = HttpRequest::new(&self.transport.url("/reviews"), HttpMethod::Get);
        Ok(self.transport.execute(request).await?.data)
    }

    /// 发表评论；新评论以 PENDING 状态等待审核
    pub async fn create_review(&self, payload: &ReviewPayload) -> ApiResult<Payload<Review>> {
        let request = HttpRequest::new(&self.transport.url("/reviews"), HttpMethod::Post)
            .with_json(serde_json::to_string(payload)?);
        self.transport.execute(request).await
    }

    /// 删除评论
    pub async fn delete_review(&self, id: &str) -> ApiResult<Payload<()>> {
        let url = self.transport.url(&format!("/reviews/{id}"));
        self.transport
            .execute_empty(HttpRequest::new(&url, HttpMethod::Delete))
            .await
    }
}
