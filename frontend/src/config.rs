//! 运行配置模块
//!
//! API 基址在编译期通过 `BOOKWORM_API_URL` 环境变量注入，
//! 未设置时回退到本地开发后端。

const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1";

/// 后端 API 基址，末尾斜杠统一剥除
pub fn api_base_url() -> &'static str {
    option_env!("BOOKWORM_API_URL")
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_has_no_trailing_slash() {
        assert!(!api_base_url().ends_with('/'));
    }
}
