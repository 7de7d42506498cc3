//! Cookie 封装模块
//!
//! 会话令牌保存在 Cookie 里（`accessToken` / `refreshToken`），
//! 这里封装 `document.cookie` 的读写删。解析逻辑独立成纯函数，
//! 方便在原生环境下测试。

use wasm_bindgen::JsCast;

/// `document.cookie` 的静态封装
pub struct Cookies;

impl Cookies {
    fn document() -> Option<web_sys::HtmlDocument> {
        web_sys::window()?
            .document()?
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()
    }

    /// 读取指定名称的 Cookie 值
    pub fn get(name: &str) -> Option<String> {
        let raw = Self::document()?.cookie().ok()?;
        parse_cookie(&raw, name)
    }

    /// 写入整站可见的 Cookie
    pub fn set(name: &str, value: &str) {
        if let Some(document) = Self::document() {
            let _ = document.set_cookie(&format!("{name}={value}; path=/; SameSite=Lax"));
        }
    }

    /// 删除指定名称的 Cookie
    pub fn delete(name: &str) {
        if let Some(document) = Self::document() {
            let _ = document.set_cookie(&format!("{name}=; path=/; Max-Age=0"));
        }
    }
}

/// 从 `document.cookie` 形态的字符串里取出指定名称的值
pub fn parse_cookie(raw: &str, name: &str) -> Option<String> {
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_cookie_among_several() {
        let raw = "theme=dim; accessToken=abc.def.ghi; refreshToken=zzz";
        assert_eq!(parse_cookie(raw, "accessToken").as_deref(), Some("abc.def.ghi"));
        assert_eq!(parse_cookie(raw, "refreshToken").as_deref(), Some("zzz"));
        assert_eq!(parse_cookie(raw, "missing"), None);
    }

    #[test]
    fn keeps_equals_signs_inside_the_value() {
        // JWT 末尾可能带 base64 填充
        let raw = "accessToken=header.payload.sig==";
        assert_eq!(
            parse_cookie(raw, "accessToken").as_deref(),
            Some("header.payload.sig==")
        );
    }

    #[test]
    fn does_not_match_name_prefixes() {
        let raw = "accessTokenOld=stale; accessToken=fresh";
        assert_eq!(parse_cookie(raw, "accessToken").as_deref(), Some("fresh"));
    }
}
