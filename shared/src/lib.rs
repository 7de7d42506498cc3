use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod stats;
pub mod token;
pub mod validate;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 访问令牌所在的 Cookie 名
pub const COOKIE_ACCESS_TOKEN: &str = "accessToken";
/// 刷新令牌所在的 Cookie 名
pub const COOKIE_REFRESH_TOKEN: &str = "refreshToken";
/// 后端在访问令牌过期时返回的 401 消息原文
pub const JWT_EXPIRED_MESSAGE: &str = "jwt expired";
/// 图片上传大小上限 (5 MB)
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
/// 所属书籍已被删除的评论/书架行的展示文案
pub const DELETED_BOOK_TITLE: &str = "Deleted Book";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

/// 书架状态，由后端在 toggle 时决定具体迁移
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShelfState {
    WantToRead,
    CurrentlyReading,
    Read,
}

impl ShelfState {
    pub fn label(&self) -> &'static str {
        match self {
            ShelfState::WantToRead => "Want to Read",
            ShelfState::CurrentlyReading => "Currently Reading",
            ShelfState::Read => "Read",
        }
    }
}

/// 评论审核状态，新评论一律从 Pending 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewStatus {
    Pending,
    Approved,
}

impl Default for ReviewStatus {
    fn default() -> Self {
        ReviewStatus::Pending
    }
}

impl ReviewStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "PENDING",
            ReviewStatus::Approved => "APPROVED",
        }
    }
}

/// 年度阅读目标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingGoal {
    pub year: i32,
    pub target_books: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub reading_goal: Option<ReadingGoal>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// 头像缺失时展示的首字母
    pub fn initial(&self) -> char {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    // populate 投影可能省略 description，给默认值避免整行反序列化失败
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 书籍的类别字段：多数接口返回完整对象，个别旧接口只回 id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreRef {
    Populated(Genre),
    Id(String),
}

impl GenreRef {
    pub fn id(&self) -> &str {
        match self {
            GenreRef::Populated(genre) => &genre.id,
            GenreRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            GenreRef::Populated(genre) => Some(&genre.name),
            GenreRef::Id(_) => None,
        }
    }
}

/// 三种书架上各有多少人
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfCount {
    pub want_to_read: u32,
    pub currently_reading: u32,
    pub read: u32,
}

impl ShelfCount {
    pub fn total(&self) -> u32 {
        self.want_to_read + self.currently_reading + self.read
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: GenreRef,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub shelf_count: ShelfCount,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
    // 仅详情接口返回：当前把这本书放上书架的用户 id 列表
    #[serde(default)]
    pub user_shelves: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Book {
    /// 指定用户当前是否已将本书放入任一书架
    pub fn is_shelved_by(&self, user_id: &str) -> bool {
        self.user_shelves.iter().any(|id| id == user_id)
    }

    pub fn genre_name(&self) -> &str {
        self.genre.name().unwrap_or("Unknown")
    }
}

/// 评论/书架里的用户引用，populate 与否皆可反序列化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Populated(Box<User>),
    Id(String),
}

impl UserRef {
    pub fn id(&self) -> &str {
        match self {
            UserRef::Populated(user) => &user.id,
            UserRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            UserRef::Populated(user) => Some(&user.name),
            UserRef::Id(_) => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            UserRef::Populated(user) => Some(&user.email),
            UserRef::Id(_) => None,
        }
    }
}

/// 评论/书架里的书籍引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookRef {
    Populated(Box<Book>),
    Id(String),
}

impl BookRef {
    pub fn id(&self) -> &str {
        match self {
            BookRef::Populated(book) => &book.id,
            BookRef::Id(id) => id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            BookRef::Populated(book) => Some(&book.title),
            BookRef::Id(_) => None,
        }
    }

    pub fn as_book(&self) -> Option<&Book> {
        match self {
            BookRef::Populated(book) => Some(book),
            BookRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<UserRef>,
    // 书被删除后后端返回 null，本行仍需可展示
    #[serde(default)]
    pub book: Option<BookRef>,
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn book_title(&self) -> &str {
        self.book
            .as_ref()
            .and_then(|book| book.title())
            .unwrap_or(DELETED_BOOK_TITLE)
    }

    pub fn reviewer_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|user| user.name())
            .unwrap_or("Unknown")
    }

    pub fn reviewer_email(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|user| user.email())
            .unwrap_or("-")
    }
}

/// 用户-书籍的书架记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelve {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: UserRef,
    #[serde(default)]
    pub book: Option<BookRef>,
    pub shelve: ShelfState,
    #[serde(default)]
    pub progress_pages: u32,
    // 仅在状态迁移为 READ 时由后端写入
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Shelve {
    pub fn book_title(&self) -> &str {
        self.book
            .as_ref()
            .and_then(|book| book.title())
            .unwrap_or(DELETED_BOOK_TITLE)
    }

    /// 阅读进度百分比 (0-100)，书籍未 populate 或无页数时为 0
    pub fn progress_percent(&self) -> u8 {
        let total = self
            .book
            .as_ref()
            .and_then(|book| book.as_book())
            .map(|book| book.total_pages)
            .unwrap_or(0);
        if total == 0 {
            return 0;
        }
        let percent = (self.progress_pages as u64 * 100) / total as u64;
        percent.min(100) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub youtube_url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Tutorial {
    /// 转换成可内嵌播放的地址；已是 embed 地址时原样返回
    pub fn embed_url(&self) -> String {
        let url = self.youtube_url.trim();
        if let Some(video) = url.split("watch?v=").nth(1) {
            let id = video.split('&').next().unwrap_or(video);
            return format!("https://www.youtube.com/embed/{id}");
        }
        if let Some(id) = url.split("youtu.be/").nth(1) {
            let id = id.split('?').next().unwrap_or(id);
            return format!("https://www.youtube.com/embed/{id}");
        }
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book_json() -> &'static str {
        r#"{
            "_id": "b1",
            "title": "Dune",
            "author": "Frank Herbert",
            "genre": { "_id": "g1", "name": "Sci-Fi" },
            "description": "Sand.",
            "coverImage": "https://img/dune.png",
            "totalPages": 412,
            "shelfCount": { "wantToRead": 3, "currentlyReading": 2, "read": 7 },
            "avgRating": 4.5,
            "totalReviews": 9,
            "userShelves": ["u1", "u2"],
            "createdAt": "2024-03-03T10:00:00.000Z",
            "updatedAt": "2024-03-04T10:00:00.000Z"
        }"#
    }

    #[test]
    fn book_deserializes_with_populated_genre() {
        let book: Book = serde_json::from_str(sample_book_json()).unwrap();
        assert_eq!(book.genre_name(), "Sci-Fi");
        assert_eq!(book.genre.id(), "g1");
        assert_eq!(book.shelf_count.total(), 12);
        assert!(book.is_shelved_by("u2"));
        assert!(!book.is_shelved_by("u3"));
    }

    #[test]
    fn book_deserializes_with_bare_genre_id() {
        let json = r#"{
            "_id": "b2",
            "title": "Emma",
            "author": "Jane Austen",
            "genre": "g9",
            "createdAt": "2024-01-01T00:00:00.000Z"
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.genre.id(), "g9");
        assert_eq!(book.genre_name(), "Unknown");
        assert_eq!(book.total_pages, 0);
        assert!(book.user_shelves.is_empty());
    }

    #[test]
    fn review_with_deleted_book_falls_back() {
        let json = r#"{
            "_id": "r1",
            "user": { "_id": "u1", "name": "Ada", "email": "ada@example.com",
                      "role": "USER", "createdAt": "2024-01-01T00:00:00.000Z" },
            "book": null,
            "rating": 3.5,
            "comment": "fine",
            "status": "APPROVED",
            "createdAt": "2024-02-01T00:00:00.000Z"
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.book_title(), DELETED_BOOK_TITLE);
        assert_eq!(review.reviewer_email(), "ada@example.com");
        assert_eq!(review.status, ReviewStatus::Approved);
    }

    #[test]
    fn review_status_defaults_to_pending() {
        let json = r#"{
            "_id": "r2",
            "rating": 4.0,
            "comment": "good",
            "createdAt": "2024-02-01T00:00:00.000Z"
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.status, ReviewStatus::Pending);
        assert_eq!(review.reviewer_name(), "Unknown");
    }

    #[test]
    fn shelf_state_round_trips_screaming_snake() {
        let json = r#""WANT_TO_READ""#;
        let state: ShelfState = serde_json::from_str(json).unwrap();
        assert_eq!(state, ShelfState::WantToRead);
        assert_eq!(serde_json::to_string(&ShelfState::CurrentlyReading).unwrap(), r#""CURRENTLY_READING""#);
    }

    #[test]
    fn shelve_progress_percent_clamps() {
        let book: Book = serde_json::from_str(sample_book_json()).unwrap();
        let shelve = Shelve {
            id: "s1".into(),
            user: UserRef::Id("u1".into()),
            book: Some(BookRef::Populated(Box::new(book))),
            shelve: ShelfState::CurrentlyReading,
            progress_pages: 206,
            finished_at: None,
            created_at: "2024-03-03T10:00:00Z".parse().unwrap(),
            updated_at: None,
        };
        assert_eq!(shelve.progress_percent(), 50);

        let over = Shelve { progress_pages: 9999, ..shelve.clone() };
        assert_eq!(over.progress_percent(), 100);

        let unpopulated = Shelve { book: Some(BookRef::Id("b1".into())), ..shelve };
        assert_eq!(unpopulated.progress_percent(), 0);
    }

    #[test]
    fn user_initial_uppercases() {
        let json = r#"{
            "_id": "u1", "name": "ada lovelace", "email": "a@b.c",
            "role": "ADMIN", "createdAt": "2024-01-01T00:00:00.000Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.initial(), 'A');
        assert!(user.is_admin());
    }

    #[test]
    fn tutorial_embed_url_conversion() {
        let mut tutorial = Tutorial {
            id: "t1".into(),
            title: "Intro".into(),
            youtube_url: "https://www.youtube.com/watch?v=abc123&t=9".into(),
            created_at: None,
        };
        assert_eq!(tutorial.embed_url(), "https://www.youtube.com/embed/abc123");

        tutorial.youtube_url = "https://youtu.be/xyz?si=1".into();
        assert_eq!(tutorial.embed_url(), "https://www.youtube.com/embed/xyz");

        tutorial.youtube_url = "https://www.youtube.com/embed/keep".into();
        assert_eq!(tutorial.embed_url(), "https://www.youtube.com/embed/keep");
    }
}
