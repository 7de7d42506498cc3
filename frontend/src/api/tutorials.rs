//! 教程资源

use super::transport::{Payload, TokenStore};
use super::Api;
use crate::error::ApiResult;
use crate::web::http::{HttpClient, HttpMethod, HttpRequest};
use bookworm_shared::protocol::TutorialPayload;
use bookworm_shared::Tutorial;

impl<C: HttpClient, S: TokenStore> Api<C, S> {
    /// 全部教程视频
    pub async fn list_tutorials(&self) -> ApiResult<Vec<Tutorial>> {
        let request = HttpRequest::new(&self.transport.url("/tutorials"), HttpMethod::Get);
        Ok(self.transport.execute(request).await?.data)
    }

    /// 新建教程
    pub async fn create_tutorial(&self, payload: &TutorialPayload) -> ApiResult<Payload<Tutorial>> {
        let request = HttpRequest::new(&self.transport.url("/tutorials"), HttpMethod::Post)
            .with_json(serde_json::to_string(payload)?);
        self.transport.execute(request).await
    }
}
