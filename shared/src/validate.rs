//! 表单校验模块
//!
//! 提交前的声明式字段校验。未通过校验的表单不会发起任何网络请求，
//! 错误文案按字段名返回，供组件就地渲染。

use crate::MAX_UPLOAD_BYTES;
use crate::protocol::{LoginPayload, RegisterPayload};
use std::collections::BTreeMap;

/// 字段名 → 错误文案
pub type FieldErrors = BTreeMap<&'static str, String>;

/// 密码允许的特殊字符集
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

// =========================================================
// 规则原语 (Rule Primitives)
// =========================================================

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} is required"));
    }
}

fn length(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    label: &str,
    min: usize,
    max: usize,
) {
    let len = value.trim().chars().count();
    if len < min {
        errors.insert(field, format!("{label} must be at least {min} characters"));
    } else if len > max {
        errors.insert(field, format!("{label} must be at most {max} characters"));
    }
}

fn email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, "Email is required".to_string());
        return;
    }
    let well_formed = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !well_formed {
        errors.insert(field, "Enter a valid email address".to_string());
    }
}

fn image_size(
    errors: &mut FieldErrors,
    field: &'static str,
    size: Option<u64>,
    label: &str,
    required: bool,
) {
    match size {
        Some(bytes) if bytes > MAX_UPLOAD_BYTES => {
            errors.insert(field, format!("{label} must be less than 5MB"));
        }
        None if required => {
            errors.insert(field, format!("{label} is required"));
        }
        _ => {}
    }
}

/// 密码策略：8-20 位，至少一个大写字母、一个数字、一个特殊字符。
/// 返回第一条违反的规则文案。
pub fn password_policy(password: &str) -> Option<String> {
    let len = password.chars().count();
    if len < 8 {
        return Some("Password must be at least 8 characters".to_string());
    }
    if len > 20 {
        return Some("Password must be at most 20 characters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain a digit".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Some(format!(
            "Password must contain a special character ({PASSWORD_SPECIALS})"
        ));
    }
    None
}

// =========================================================
// 表单校验器 (Form Validators)
// =========================================================

/// 登录表单：两个字段非空即可，真正的校验在服务端
pub fn validate_login(payload: &LoginPayload) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    email(&mut errors, "email", &payload.email);
    require(&mut errors, "password", &payload.password, "Password");
    finish(errors)
}

/// 注册表单；`photo_size` 为所选头像的字节数（未选择则为 None）
pub fn validate_signup(payload: &RegisterPayload, photo_size: Option<u64>) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    require(&mut errors, "name", &payload.name, "Name");
    email(&mut errors, "email", &payload.email);
    if let Some(message) = password_policy(&payload.password) {
        errors.insert("password", message);
    }
    image_size(&mut errors, "photo", photo_size, "Profile photo", true);
    finish(errors)
}

/// 书籍表单的原始输入；总页数在校验前保持字符串形态
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub total_pages: String,
    pub cover_size: Option<u64>,
}

/// 创建/编辑书籍表单；编辑时封面可留空（保持原图）
pub fn validate_book(draft: &BookDraft, require_cover: bool) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    length(&mut errors, "title", &draft.title, "Title", 2, 300);
    length(&mut errors, "author", &draft.author, "Author", 2, 100);
    require(&mut errors, "genre", &draft.genre, "Genre");
    length(&mut errors, "description", &draft.description, "Description", 2, 1000);
    match draft.total_pages.trim().parse::<u32>() {
        Ok(pages) if pages > 0 => {}
        _ => {
            errors.insert(
                "totalPages",
                "Total pages must be a positive number".to_string(),
            );
        }
    }
    image_size(&mut errors, "coverImage", draft.cover_size, "Cover image", require_cover);
    finish(errors)
}

pub fn validate_genre(name: &str, description: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    length(&mut errors, "name", name, "Name", 2, 50);
    require(&mut errors, "description", description, "Description");
    if description.trim().chars().count() > 200 {
        errors.insert(
            "description",
            "Description must be at most 200 characters".to_string(),
        );
    }
    finish(errors)
}

pub fn validate_tutorial(title: &str, youtube_url: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    require(&mut errors, "title", title, "Title");
    require(&mut errors, "youtubeUrl", youtube_url, "Video URL");
    finish(errors)
}

/// 评分必须落在 0-5 的半星刻度上
pub fn validate_review(rating: f64, comment: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if !(0.0..=5.0).contains(&rating) || (rating * 2.0).fract() != 0.0 {
        errors.insert(
            "rating",
            "Rating must be between 0 and 5 in half-star steps".to_string(),
        );
    }
    require(&mut errors, "comment", comment, "Comment");
    finish(errors)
}

fn finish(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(name: &str, email: &str, password: &str) -> RegisterPayload {
        RegisterPayload {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn weak_password_is_rejected_with_policy_message() {
        let err = validate_signup(&signup("Ada", "ada@example.com", "weakpass"), None).unwrap_err();
        let message = err.get("password").unwrap();
        assert!(message.contains("uppercase"), "got: {message}");
    }

    #[test]
    fn password_policy_checks_each_rule() {
        assert!(password_policy("Sh0rt!").unwrap().contains("at least 8"));
        assert!(password_policy(&format!("A1!{}", "a".repeat(20))).unwrap().contains("at most 20"));
        assert!(password_policy("alllower1!").unwrap().contains("uppercase"));
        assert!(password_policy("NoDigits!!").unwrap().contains("digit"));
        assert!(password_policy("NoSpecial1").unwrap().contains("special"));
        assert_eq!(password_policy("Str0ng&pass"), None);
    }

    #[test]
    fn signup_accepts_valid_input_with_photo() {
        let ok = validate_signup(
            &signup("Ada", "ada@example.com", "Str0ng&pass"),
            Some(1024 * 1024),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn oversized_photo_is_rejected() {
        let err = validate_signup(
            &signup("Ada", "ada@example.com", "Str0ng&pass"),
            Some(MAX_UPLOAD_BYTES + 1),
        )
        .unwrap_err();
        assert_eq!(
            err.get("photo").map(String::as_str),
            Some("Profile photo must be less than 5MB")
        );
    }

    #[test]
    fn signup_requires_a_photo() {
        let err = validate_signup(&signup("Ada", "ada@example.com", "Str0ng&pass"), None)
            .unwrap_err();
        assert_eq!(
            err.get("photo").map(String::as_str),
            Some("Profile photo is required")
        );
    }

    #[test]
    fn login_requires_both_fields() {
        let err = validate_login(&LoginPayload {
            email: "not-an-email".into(),
            password: "".into(),
        })
        .unwrap_err();
        assert!(err.contains_key("email"));
        assert!(err.contains_key("password"));
    }

    #[test]
    fn book_draft_is_checked_field_by_field() {
        let draft = BookDraft {
            title: "D".into(),
            author: "Frank Herbert".into(),
            genre: "".into(),
            description: "A desert planet epic.".into(),
            total_pages: "412".into(),
            cover_size: Some(2048),
        };
        let err = validate_book(&draft, true).unwrap_err();
        assert!(err.get("title").unwrap().contains("at least 2"));
        assert!(err.contains_key("genre"));
        assert!(!err.contains_key("author"));
        assert!(!err.contains_key("totalPages"));
    }

    #[test]
    fn book_pages_must_be_numeric_string() {
        let draft = BookDraft {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            genre: "g1".into(),
            description: "A desert planet epic.".into(),
            total_pages: "lots".into(),
            cover_size: Some(2048),
        };
        let err = validate_book(&draft, true).unwrap_err();
        assert!(err.contains_key("totalPages"));
    }

    #[test]
    fn edit_book_may_omit_cover() {
        let draft = BookDraft {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            genre: "g1".into(),
            description: "A desert planet epic.".into(),
            total_pages: "412".into(),
            cover_size: None,
        };
        assert!(validate_book(&draft, false).is_ok());
        assert!(validate_book(&draft, true).is_err());
    }

    #[test]
    fn genre_limits_are_enforced() {
        assert!(validate_genre("Mystery", "Suspenseful fiction").is_ok());
        assert!(validate_genre("M", "ok").unwrap_err().contains_key("name"));
        let long = "d".repeat(201);
        assert!(validate_genre("Mystery", &long).unwrap_err().contains_key("description"));
    }

    #[test]
    fn review_rating_must_be_half_steps() {
        assert!(validate_review(3.5, "Loved it").is_ok());
        assert!(validate_review(3.25, "Loved it").unwrap_err().contains_key("rating"));
        assert!(validate_review(5.5, "Loved it").unwrap_err().contains_key("rating"));
        assert!(validate_review(4.0, "  ").unwrap_err().contains_key("comment"));
    }

    #[test]
    fn tutorial_requires_title_and_url() {
        let err = validate_tutorial("", "").unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(validate_tutorial("Intro", "https://youtu.be/x").is_ok());
    }
}
