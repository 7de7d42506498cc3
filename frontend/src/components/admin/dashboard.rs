use bookworm_shared::protocol::BookFilters;
use bookworm_shared::stats::{monthly_activity, pending_reviews};
use chrono::Utc;
use leptos::prelude::*;

use crate::components::icons::{BookOpen, MessageSquare, Star, Users as UsersIcon};
use crate::hooks::{self, use_hook_ctx};

/// 活动表覆盖的月数
const ACTIVITY_MONTHS: u32 = 6;
/// 活动统计一次抓取的上限；目录超过此规模时只统计最近一批
const ACTIVITY_FETCH_LIMIT: u32 = 1000;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let ctx = use_hook_ctx();

    // 三路查询各自独立并发，谁先回来谁先点亮自己的卡片
    let filters = Signal::derive(|| BookFilters {
        limit: Some(ACTIVITY_FETCH_LIMIT),
        ..BookFilters::default()
    });
    let books = hooks::books::use_book_list(ctx, filters);
    let users = hooks::users::use_users(ctx);
    let reviews = hooks::reviews::use_reviews(ctx);

    let total_books = move || books.data.get().map(|page| page.meta.total).unwrap_or(0);
    let total_users = move || users.data.get().map(|rows| rows.len()).unwrap_or(0);
    let total_reviews = move || reviews.data.get().map(|rows| rows.len()).unwrap_or(0);
    let pending = move || {
        reviews
            .data
            .get()
            .map(|rows| pending_reviews(&rows))
            .unwrap_or(0)
    };

    let activity = move || {
        let books = books.data.get().map(|page| page.data).unwrap_or_default();
        let users = users.data.get().unwrap_or_default();
        monthly_activity(&books, &users, &Utc::now(), ACTIVITY_MONTHS)
    };

    let first_error = move || {
        books
            .error
            .get()
            .or_else(|| users.error.get())
            .or_else(|| reviews.error.get())
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"Dashboard"</h1>

            {move || first_error().map(|message| view! {
                <div class="alert alert-error">{message}</div>
            })}

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <BookOpen attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Total Books"</div>
                    <div class="stat-value text-primary">{total_books}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-secondary">
                        <UsersIcon attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Total Users"</div>
                    <div class="stat-value text-secondary">{total_users}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-accent">
                        <MessageSquare attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Total Reviews"</div>
                    <div class="stat-value text-accent">{total_reviews}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-warning">
                        <Star attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Pending Reviews"</div>
                    <div class="stat-value text-warning">{pending}</div>
                    <div class="stat-desc">"Awaiting moderation"</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"Activity (Last 6 Months)"</h2>
                    <div class="overflow-x-auto">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Month"</th>
                                    <th>"Books Added"</th>
                                    <th>"New Users"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    activity()
                                        .into_iter()
                                        .map(|row| {
                                            view! {
                                                <tr>
                                                    <td>{row.month.label()}</td>
                                                    <td>{row.books_added}</td>
                                                    <td>{row.users_added}</td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    }
}
