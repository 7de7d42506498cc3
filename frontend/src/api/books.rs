//! 图书资源：目录列表、详情、推荐、后台增删改

use web_sys::File;

use super::transport::{Payload, TokenStore};
use super::Api;
use crate::error::ApiResult;
use crate::web::http::{HttpClient, HttpMethod, HttpRequest, MultipartForm};
use bookworm_shared::protocol::{BookDetail, BookFilters, BookPayload, Paginated};
use bookworm_shared::Book;

impl<C: HttpClient, S: TokenStore> Api<C, S> {
    /// 按筛选条件取分页书单
    pub async fn list_books(&self, filters: &BookFilters) -> ApiResult<Paginated<Book>> {
        let url = format!("{}{}", self.transport.url("/books"), filters.to_query_string());
        let request = HttpRequest::new(&url, HttpMethod::Get);
        Ok(self.transport.execute(request).await?.data)
    }

    /// 图书详情（附带评论）
    pub async fn book_detail(&self, id: &str) -> ApiResult<BookDetail> {
        let url = self.transport.url(&format!("/books/{id}"));
        let request = HttpRequest::new(&url, HttpMethod::Get);
        Ok(self.transport.execute(request).await?.data)
    }

    /// 首页推荐书单
    pub async fn recommended_books(&self) -> ApiResult<Vec<Book>> {
        let request = HttpRequest::new(&self.transport.url("/books/recommended"), HttpMethod::Get);
        Ok(self.transport.execute(request).await?.data)
    }

    /// 新建图书（JSON `data` 部分 + 可选 `coverImage` 文件部分）
    pub async fn create_book(
        &self,
        payload: &BookPayload,
        cover: Option<File>,
    ) -> ApiResult<Payload<Book>> {
        let request = HttpRequest::new(&self.transport.url("/books"), HttpMethod::Post)
            .with_multipart(book_form(payload, cover)?);
        self.transport.execute(request).await
    }

    /// 更新图书；不换封面时 `cover` 传 None
    pub async fn update_book(
        &self,
        id: &str,
        payload: &BookPayload,
        cover: Option<File>,
    ) -> ApiResult<Payload<Book>> {
        let url = self.transport.url(&format!("/books/{id}"));
        let request =
            HttpRequest::new(&url, HttpMethod::Put).with_multipart(book_form(payload, cover)?);
        self.transport.execute(request).await
    }

    /// 删除图书
    pub async fn delete_book(&self, id: &str) -> ApiResult<Payload<()>> {
        let url = self.transport.url(&format!("/books/{id}"));
        self.transport
            .execute_empty(HttpRequest::new(&url, HttpMethod::Delete))
            .await
    }
}

fn book_form(payload: &BookPayload, cover: Option<File>) -> Result<MultipartForm, serde_json::Error> {
    let mut form = MultipartForm::new().text("data", serde_json::to_string(payload)?);
    if let Some(file) = cover {
        form = form.file("coverImage", file);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::logged_in_api;
    use crate::web::http::RequestBody;
    use bookworm_shared::protocol::{BookSortKey, SortOrder};

    const BOOK_LIST: &str = r#"{"success":true,"data":{"data":[],"meta":{"page":2,"limit":9,"total":40,"totalPages":5}}}"#;

    #[tokio::test]
    async fn list_books_forwards_only_the_present_filters() {
        let api = logged_in_api();
        api.client().stub(
            "/books?searchTerm=dune&sortBy=rating&sortOrder=asc&page=2&limit=9",
            200,
            BOOK_LIST,
        );

        let filters = BookFilters {
            search_term: "dune".into(),
            sort_by: Some(BookSortKey::Rating),
            sort_order: Some(SortOrder::Asc),
            page: Some(2),
            limit: Some(9),
            ..Default::default()
        };
        let page = api.list_books(&filters).await.unwrap();

        assert_eq!(page.meta.total_pages, 5);
        assert_eq!(page.meta.page, 2);
    }

    #[tokio::test]
    async fn unfiltered_list_has_no_query_string() {
        let api = logged_in_api();
        api.client().stub("/books", 200, BOOK_LIST);

        api.list_books(&BookFilters::default()).await.unwrap();

        assert!(api.client().last_request().url.ends_with("/books"));
    }

    #[tokio::test]
    async fn create_book_posts_a_multipart_data_part() {
        let api = logged_in_api();
        api.client().stub(
            "/books",
            200,
            r#"{"success":true,"message":"Book created successfully","data":{"_id":"b1","title":"Dune","author":"Frank Herbert","genre":"g1","totalPages":412,"createdAt":"2026-01-15T10:00:00Z"}}"#,
        );

        let payload = BookPayload {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            genre: "g1".into(),
            description: "Desert planet epic".into(),
            total_pages: 412,
        };
        let created = api.create_book(&payload, None).await.unwrap();

        assert_eq!(created.message.as_deref(), Some("Book created successfully"));
        let request = api.client().last_request();
        let RequestBody::Multipart(form) = &request.body else {
            panic!("expected a multipart body");
        };
        let data = form.text_part("data").expect("data part present");
        assert!(data.contains(r#""totalPages":412"#));
    }
}
