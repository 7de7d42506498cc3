use crate::{Book, Review, Role};
use serde::{Deserialize, Serialize};

/// Default page size of the browse grid (3 x 3 cards).
pub const DEFAULT_PAGE_LIMIT: u32 = 9;

// =========================================================
// Response Envelope
// =========================================================

/// Standard envelope wrapping every API payload.
///
/// Error responses carry `success: false` and no `data`; the transport
/// layer extracts the human-readable `message` before callers see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Pagination metadata attached to paginated list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// Paginated collection as returned by the book list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: ListMeta,
}

/// Payload of `GET /books/:id`: the book plus its reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetail {
    pub book: Book,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

// =========================================================
// Book List Filters
// =========================================================

/// Sort keys accepted by the book list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookSortKey {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "shelved")]
    Shelved,
    #[serde(rename = "title")]
    Title,
}

impl BookSortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookSortKey::CreatedAt => "createdAt",
            BookSortKey::Rating => "rating",
            BookSortKey::Shelved => "shelved",
            BookSortKey::Title => "title",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "createdAt" => Some(BookSortKey::CreatedAt),
            "rating" => Some(BookSortKey::Rating),
            "shelved" => Some(BookSortKey::Shelved),
            "title" => Some(BookSortKey::Title),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Desc => "desc",
            SortOrder::Asc => "asc",
        }
    }
}

/// Query filters for the book list.
///
/// Only filters that carry a value are serialized; absent filters are
/// omitted entirely, never forwarded as empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilters {
    pub search_term: String,
    pub genres: Vec<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub sort_by: Option<BookSortKey>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl BookFilters {
    /// Collect the present filters as query pairs, in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let term = self.search_term.trim();
        if !term.is_empty() {
            pairs.push(("searchTerm", term.to_string()));
        }
        if !self.genres.is_empty() {
            pairs.push(("genre", self.genres.join(",")));
        }
        if let Some(min) = self.min_rating {
            pairs.push(("minRating", format_number(min)));
        }
        if let Some(max) = self.max_rating {
            pairs.push(("maxRating", format_number(max)));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sortBy", sort_by.as_str().to_string()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sortOrder", order.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }

    /// Render the filters as a URL query string ("" when nothing is set).
    pub fn to_query_string(&self) -> String {
        let pairs = self.to_query_pairs();
        if pairs.is_empty() {
            return String::new();
        }
        let encoded: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", percent_encode(value)))
            .collect();
        format!("?{}", encoded.join("&"))
    }
}

/// Drop the fraction when the value is whole ("4" rather than "4.0").
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Minimal percent-encoding for query values (RFC 3986 unreserved set
/// passes through, everything else is escaped byte-wise).
pub fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// =========================================================
// Request Payloads
// =========================================================

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// JSON `data` part of the multipart `POST /auth/register` body; the
/// photo travels as a separate file part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Token pair issued by login/register and mirrored into the cookies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Response of `POST /auth/refresh-token`; only the access token is
/// guaranteed to rotate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// JSON `data` part of the multipart book create/update body; the cover
/// image travels as a separate file part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    /// Genre id reference.
    pub genre: String,
    pub description: String,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenrePayload {
    pub name: String,
    pub description: String,
}

/// Body of `POST /reviews`; the server re-derives the author from the
/// bearer token, the explicit user id mirrors it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub user: String,
    pub book: String,
    pub rating: f64,
    pub comment: String,
}

/// Body of `POST /shelves/toggle-shelve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TogglePayload {
    pub user: String,
    pub book: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialPayload {
    pub title: String,
    pub youtube_url: String,
}

/// Body of `PATCH /users/:id`; the only field this client mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePayload {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_produce_no_pairs() {
        let filters = BookFilters::default();
        assert!(filters.to_query_pairs().is_empty());
        assert_eq!(filters.to_query_string(), "");
    }

    #[test]
    fn blank_search_term_is_omitted() {
        let filters = BookFilters {
            search_term: "   ".into(),
            ..Default::default()
        };
        assert!(filters.to_query_pairs().is_empty());
    }

    #[test]
    fn present_filters_are_forwarded_in_order() {
        let filters = BookFilters {
            search_term: "dune".into(),
            genres: vec!["g1".into(), "g2".into()],
            min_rating: Some(2.0),
            max_rating: Some(4.5),
            sort_by: Some(BookSortKey::Rating),
            sort_order: Some(SortOrder::Asc),
            page: Some(2),
            limit: Some(9),
        };
        assert_eq!(
            filters.to_query_pairs(),
            vec![
                ("searchTerm", "dune".to_string()),
                ("genre", "g1,g2".to_string()),
                ("minRating", "2".to_string()),
                ("maxRating", "4.5".to_string()),
                ("sortBy", "rating".to_string()),
                ("sortOrder", "asc".to_string()),
                ("page", "2".to_string()),
                ("limit", "9".to_string()),
            ]
        );
    }

    #[test]
    fn query_string_is_percent_encoded() {
        let filters = BookFilters {
            search_term: "war & peace".into(),
            page: Some(1),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query_string(),
            "?searchTerm=war%20%26%20peace&page=1"
        );
    }

    #[test]
    fn envelope_tolerates_missing_data() {
        let json = r#"{ "success": false, "message": "Book not found" }"#;
        let envelope: ApiEnvelope<Book> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Book not found"));
        assert!(envelope.data.is_none());
    }

    #[test]
    fn paginated_books_parse_with_meta() {
        let json = r#"{
            "data": [],
            "meta": { "page": 2, "limit": 9, "total": 23, "totalPages": 3 }
        }"#;
        let page: Paginated<Book> = serde_json::from_str(json).unwrap();
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.meta.page, 2);
    }

    #[test]
    fn sort_key_parse_rejects_unknown() {
        assert_eq!(BookSortKey::parse("rating"), Some(BookSortKey::Rating));
        assert_eq!(BookSortKey::parse("price"), None);
    }
}
