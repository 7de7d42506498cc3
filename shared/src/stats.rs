//! 阅读统计模块
//!
//! 从书架与列表数据中聚合出个人主页与管理后台所需的统计指标。
//! 全部为纯函数，独立于任何请求与渲染逻辑。

use crate::date::{MonthKey, same_year};
use crate::{Book, Review, ReviewStatus, ShelfCount, ShelfState, Shelve, User};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

// =========================================================
// 个人主页统计 (Reading Stats)
// =========================================================

/// 个人主页展示的阅读统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingStats {
    pub read: u32,
    /// 今年读完的书（按 finished_at 落在当前年计）
    pub read_this_year: u32,
    /// 已读书籍的总页数合计
    pub total_pages_read: u64,
    pub currently_reading: u32,
    pub want_to_read: u32,
    /// 已读书籍中出现次数最多的类别名
    pub favorite_genre: Option<String>,
}

pub fn reading_stats(shelves: &[Shelve], now: &DateTime<Utc>) -> ReadingStats {
    let mut stats = ReadingStats::default();
    let mut genre_counts: HashMap<&str, u32> = HashMap::new();

    for shelve in shelves {
        let book = shelve.book.as_ref().and_then(|book| book.as_book());
        match shelve.shelve {
            ShelfState::Read => {
                stats.read += 1;
                if let Some(finished) = &shelve.finished_at {
                    if same_year(finished, now) {
                        stats.read_this_year += 1;
                    }
                }
                if let Some(book) = book {
                    stats.total_pages_read += book.total_pages as u64;
                    if let Some(name) = book.genre.name() {
                        *genre_counts.entry(name).or_insert(0) += 1;
                    }
                }
            }
            ShelfState::CurrentlyReading => {
                stats.currently_reading += 1;
            }
            ShelfState::WantToRead => {
                stats.want_to_read += 1;
            }
        }
    }

    // 并列时取字典序最小的，保证结果稳定
    stats.favorite_genre = genre_counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
        .map(|(name, _)| name.to_string());
    stats
}

/// 我的书架页签上的分组计数
pub fn shelf_counts(shelves: &[Shelve]) -> ShelfCount {
    let mut counts = ShelfCount::default();
    for shelve in shelves {
        match shelve.shelve {
            ShelfState::WantToRead => counts.want_to_read += 1,
            ShelfState::CurrentlyReading => counts.currently_reading += 1,
            ShelfState::Read => counts.read += 1,
        }
    }
    counts
}

// =========================================================
// 管理后台统计 (Back-office Stats)
// =========================================================

/// 单月新增活动
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyActivity {
    pub month: MonthKey,
    pub books_added: u32,
    pub users_added: u32,
}

/// 最近 `months` 个月（含当月）的新增书籍与用户数，按时间升序返回
pub fn monthly_activity(
    books: &[Book],
    users: &[User],
    now: &DateTime<Utc>,
    months: u32,
) -> Vec<MonthlyActivity> {
    let current = MonthKey::of(now);
    let mut window: Vec<MonthlyActivity> = (0..months)
        .rev()
        .map(|back| MonthlyActivity {
            month: current.back(back),
            books_added: 0,
            users_added: 0,
        })
        .collect();

    let mut index: HashMap<MonthKey, usize> = HashMap::new();
    for (i, row) in window.iter().enumerate() {
        index.insert(row.month, i);
    }

    for book in books {
        if let Some(&i) = index.get(&MonthKey::of(&book.created_at)) {
            window[i].books_added += 1;
        }
    }
    for user in users {
        if let Some(&i) = index.get(&MonthKey::of(&user.created_at)) {
            window[i].users_added += 1;
        }
    }
    window
}

/// 等待审核的评论数
pub fn pending_reviews(reviews: &[Review]) -> u32 {
    reviews
        .iter()
        .filter(|review| review.status == ReviewStatus::Pending)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BookRef, GenreRef, Genre, UserRef};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn book(id: &str, genre: &str, pages: u32, created: &str) -> Book {
        Book {
            id: id.into(),
            title: format!("Book {id}"),
            author: "A. Author".into(),
            genre: GenreRef::Populated(Genre {
                id: format!("g-{genre}"),
                name: genre.into(),
                description: String::new(),
                created_at: None,
                updated_at: None,
            }),
            description: String::new(),
            cover_image: String::new(),
            total_pages: pages,
            shelf_count: ShelfCount::default(),
            avg_rating: 0.0,
            total_reviews: 0,
            user_shelves: Vec::new(),
            created_at: ts(created),
            updated_at: None,
        }
    }

    fn shelve(book: Option<Book>, state: ShelfState, progress: u32, finished: Option<&str>) -> Shelve {
        Shelve {
            id: "s".into(),
            user: UserRef::Id("u1".into()),
            book: book.map(|b| BookRef::Populated(Box::new(b))),
            shelve: state,
            progress_pages: progress,
            finished_at: finished.map(ts),
            created_at: ts("2026-01-01T00:00:00Z"),
            updated_at: None,
        }
    }

    fn user(id: &str, created: &str) -> User {
        User {
            id: id.into(),
            name: "Reader".into(),
            email: format!("{id}@example.com"),
            photo: None,
            role: crate::Role::User,
            reading_goal: None,
            last_login: None,
            created_at: ts(created),
            updated_at: None,
        }
    }

    #[test]
    fn reading_stats_aggregate_by_state() {
        let now = ts("2026-08-25T00:00:00Z");
        let shelves = vec![
            shelve(Some(book("b1", "Sci-Fi", 400, "2024-01-01T00:00:00Z")), ShelfState::Read, 0, Some("2026-02-01T00:00:00Z")),
            shelve(Some(book("b2", "Sci-Fi", 300, "2024-01-01T00:00:00Z")), ShelfState::Read, 0, Some("2025-11-11T00:00:00Z")),
            shelve(Some(book("b3", "Romance", 250, "2024-01-01T00:00:00Z")), ShelfState::CurrentlyReading, 120, None),
            shelve(Some(book("b4", "Horror", 180, "2024-01-01T00:00:00Z")), ShelfState::WantToRead, 0, None),
        ];
        let stats = reading_stats(&shelves, &now);
        assert_eq!(stats.read, 2);
        assert_eq!(stats.read_this_year, 1);
        assert_eq!(stats.total_pages_read, 400 + 300);
        assert_eq!(stats.currently_reading, 1);
        assert_eq!(stats.want_to_read, 1);
        assert_eq!(stats.favorite_genre.as_deref(), Some("Sci-Fi"));
    }

    #[test]
    fn reading_stats_survive_deleted_books() {
        let now = ts("2026-08-25T00:00:00Z");
        let mut row = shelve(None, ShelfState::Read, 0, Some("2026-03-01T00:00:00Z"));
        row.book = Some(BookRef::Id("gone".into()));
        let stats = reading_stats(&[row], &now);
        assert_eq!(stats.read_this_year, 1);
        assert_eq!(stats.total_pages_read, 0);
        assert_eq!(stats.favorite_genre, None);
    }

    #[test]
    fn favorite_genre_tie_breaks_alphabetically() {
        let now = ts("2026-08-25T00:00:00Z");
        let shelves = vec![
            shelve(Some(book("b1", "Romance", 100, "2024-01-01T00:00:00Z")), ShelfState::Read, 0, None),
            shelve(Some(book("b2", "Horror", 100, "2024-01-01T00:00:00Z")), ShelfState::Read, 0, None),
        ];
        let stats = reading_stats(&shelves, &now);
        assert_eq!(stats.favorite_genre.as_deref(), Some("Horror"));
    }

    #[test]
    fn shelf_counts_group_by_state() {
        let shelves = vec![
            shelve(None, ShelfState::Read, 0, None),
            shelve(None, ShelfState::Read, 0, None),
            shelve(None, ShelfState::CurrentlyReading, 10, None),
        ];
        let counts = shelf_counts(&shelves);
        assert_eq!(counts.read, 2);
        assert_eq!(counts.currently_reading, 1);
        assert_eq!(counts.want_to_read, 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn monthly_activity_buckets_last_months_ascending() {
        let now = ts("2026-03-15T00:00:00Z");
        let books = vec![
            book("b1", "Sci-Fi", 100, "2026-03-01T00:00:00Z"),
            book("b2", "Sci-Fi", 100, "2026-01-20T00:00:00Z"),
            book("b3", "Sci-Fi", 100, "2025-12-31T00:00:00Z"),
            book("b4", "Sci-Fi", 100, "2020-01-01T00:00:00Z"), // 窗口之外
        ];
        let users = vec![user("u1", "2026-02-10T00:00:00Z"), user("u2", "2026-03-02T00:00:00Z")];

        let rows = monthly_activity(&books, &users, &now, 6);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].month, MonthKey { year: 2025, month: 10 });
        assert_eq!(rows[5].month, MonthKey { year: 2026, month: 3 });

        let december = &rows[2];
        assert_eq!(december.month, MonthKey { year: 2025, month: 12 });
        assert_eq!(december.books_added, 1);
        assert_eq!(december.users_added, 0);

        let march = &rows[5];
        assert_eq!(march.books_added, 1);
        assert_eq!(march.users_added, 1);
    }
}
