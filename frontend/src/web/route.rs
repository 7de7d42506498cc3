//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、角色门禁与统一的导航裁决。

use bookworm_shared::Role;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面（公开，默认路由）
    #[default]
    Login,
    /// 注册页面（公开）
    Signup,
    /// 根路径，仅作为按角色分流的入口
    Root,
    /// 书目浏览
    Browse,
    /// 书籍详情，携带书籍 id
    BookDetail(String),
    /// 用户主页
    UserHome,
    /// 我的书架
    UserLibrary,
    /// 教程列表
    Tutorials,
    /// 管理端仪表盘
    AdminDashboard,
    /// 管理端书籍管理
    AdminBooks,
    /// 管理端类别管理
    AdminGenres,
    /// 管理端评论管理
    AdminReviews,
    /// 管理端用户管理
    AdminUsers,
    /// 管理端教程管理
    AdminTutorials,
    /// 页面未找到
    NotFound,
}

/// 页面归属的界面区块，决定包裹的导航骨架
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// 公开的认证页，无骨架
    Auth,
    /// 普通用户区，顶部导航栏
    User,
    /// 管理区，侧边栏
    Admin,
    /// 无骨架（404 等）
    Bare,
}

/// 导航裁决：放行或重定向到另一条路由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Redirect(AppRoute),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        // 统一去掉末尾斜杠，"/browse-books/" 与 "/browse-books" 等价
        let trimmed = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        match trimmed {
            "" | "/" => Self::Root,
            "/login" => Self::Login,
            "/signup" | "/register" => Self::Signup,
            "/browse-books" => Self::Browse,
            "/user/home" => Self::UserHome,
            "/user/my-library" => Self::UserLibrary,
            "/tutorials" => Self::Tutorials,
            "/admin/dashboard" => Self::AdminDashboard,
            "/admin/books" => Self::AdminBooks,
            "/admin/genres" => Self::AdminGenres,
            "/admin/reviews" => Self::AdminReviews,
            "/admin/users" => Self::AdminUsers,
            "/admin/tutorials" => Self::AdminTutorials,
            other => match other.strip_prefix("/browse-books/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Self::BookDetail(id.to_string())
                }
                _ => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Root => "/".to_string(),
            Self::Browse => "/browse-books".to_string(),
            Self::BookDetail(id) => format!("/browse-books/{id}"),
            Self::UserHome => "/user/home".to_string(),
            Self::UserLibrary => "/user/my-library".to_string(),
            Self::Tutorials => "/tutorials".to_string(),
            Self::AdminDashboard => "/admin/dashboard".to_string(),
            Self::AdminBooks => "/admin/books".to_string(),
            Self::AdminGenres => "/admin/genres".to_string(),
            Self::AdminReviews => "/admin/reviews".to_string(),
            Self::AdminUsers => "/admin/users".to_string(),
            Self::AdminTutorials => "/admin/tutorials".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 公开路由：未登录也可访问
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 路由归属的界面区块
    pub fn section(&self) -> Section {
        match self {
            Self::Login | Self::Signup => Section::Auth,
            Self::Root
            | Self::Browse
            | Self::BookDetail(_)
            | Self::UserHome
            | Self::UserLibrary
            | Self::Tutorials => Section::User,
            Self::AdminDashboard
            | Self::AdminBooks
            | Self::AdminGenres
            | Self::AdminReviews
            | Self::AdminUsers
            | Self::AdminTutorials => Section::Admin,
            Self::NotFound => Section::Bare,
        }
    }

    /// `/user/*` 前缀路由：对管理员关闭
    fn is_user_prefixed(&self) -> bool {
        matches!(self, Self::UserHome | Self::UserLibrary)
    }

    /// 角色对应的落地页
    pub fn landing_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::User => Self::UserLibrary,
        }
    }

    /// **核心守卫逻辑**：对（目标路由，会话角色）给出统一裁决。
    ///
    /// - 未登录访问非公开路由 → 登录页
    /// - 已登录访问认证页或根路径 → 按角色落地
    /// - USER 访问 `/admin/*` → 用户落地页
    /// - ADMIN 访问 `/user/*` → 管理落地页
    pub fn verdict(&self, role: Option<Role>) -> Verdict {
        let Some(role) = role else {
            return if self.is_public() {
                Verdict::Allow
            } else {
                Verdict::Redirect(Self::Login)
            };
        };

        if self.is_public() || matches!(self, Self::Root) {
            return Verdict::Redirect(Self::landing_for(role));
        }

        match (self.section(), role) {
            (Section::Admin, Role::User) => Verdict::Redirect(Self::landing_for(Role::User)),
            (Section::User, Role::Admin) if self.is_user_prefixed() => {
                Verdict::Redirect(Self::landing_for(Role::Admin))
            }
            _ => Verdict::Allow,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(path: &str, role: Option<Role>) -> Verdict {
        AppRoute::from_path(path).verdict(role)
    }

    #[test]
    fn paths_round_trip_through_the_enum() {
        for path in [
            "/login",
            "/signup",
            "/",
            "/browse-books",
            "/browse-books/66f1a2",
            "/user/home",
            "/user/my-library",
            "/tutorials",
            "/admin/dashboard",
            "/admin/books",
            "/admin/genres",
            "/admin/reviews",
            "/admin/users",
            "/admin/tutorials",
        ] {
            assert_eq!(AppRoute::from_path(path).to_path(), path, "at {path}");
        }
    }

    #[test]
    fn trailing_slash_and_unknown_paths() {
        assert_eq!(AppRoute::from_path("/browse-books/"), AppRoute::Browse);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(
            AppRoute::from_path("/browse-books/a/b"),
            AppRoute::NotFound
        );
        assert_eq!(
            AppRoute::from_path("/browse-books/42"),
            AppRoute::BookDetail("42".into())
        );
    }

    #[test]
    fn anonymous_visitors_only_reach_public_routes() {
        assert_eq!(verdict("/login", None), Verdict::Allow);
        assert_eq!(verdict("/signup", None), Verdict::Allow);
        for path in ["/", "/browse-books", "/user/home", "/admin/dashboard", "/nope"] {
            assert_eq!(
                verdict(path, None),
                Verdict::Redirect(AppRoute::Login),
                "at {path}"
            );
        }
    }

    #[test]
    fn root_splits_by_role() {
        assert_eq!(
            verdict("/", Some(Role::User)),
            Verdict::Redirect(AppRoute::UserLibrary)
        );
        assert_eq!(
            verdict("/", Some(Role::Admin)),
            Verdict::Redirect(AppRoute::AdminDashboard)
        );
    }

    #[test]
    fn authenticated_users_leave_auth_pages() {
        assert_eq!(
            verdict("/login", Some(Role::User)),
            Verdict::Redirect(AppRoute::UserLibrary)
        );
        assert_eq!(
            verdict("/signup", Some(Role::Admin)),
            Verdict::Redirect(AppRoute::AdminDashboard)
        );
    }

    #[test]
    fn role_mismatch_redirects_to_own_landing() {
        assert_eq!(
            verdict("/admin/books", Some(Role::User)),
            Verdict::Redirect(AppRoute::UserLibrary)
        );
        assert_eq!(
            verdict("/user/home", Some(Role::Admin)),
            Verdict::Redirect(AppRoute::AdminDashboard)
        );
    }

    #[test]
    fn shared_catalogue_routes_stay_open_to_both_roles() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(verdict("/browse-books", Some(role)), Verdict::Allow);
            assert_eq!(verdict("/browse-books/42", Some(role)), Verdict::Allow);
            assert_eq!(verdict("/tutorials", Some(role)), Verdict::Allow);
        }
        assert_eq!(verdict("/user/my-library", Some(Role::User)), Verdict::Allow);
        assert_eq!(verdict("/admin/users", Some(Role::Admin)), Verdict::Allow);
    }
}
