//! Cookie 存储封装模块
//!
//! 会话 token 和 setup 完成标记保存在 cookie 中。
//! `BrowserCookies` 直接读写 `document.cookie`，`MemoryCookies` 用于测试。

use std::collections::HashMap;
use std::sync::Mutex;

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

pub trait CookieStore: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str) -> bool;
    fn remove(&self, name: &str) -> bool;
}

/// 从 `a=b; c=d` 格式的 cookie 字符串中取出指定名称的值
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// 浏览器 cookie
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserCookies;

impl BrowserCookies {
    fn document() -> Option<HtmlDocument> {
        web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
    }

    fn write(raw: &str) -> bool {
        Self::document()
            .and_then(|doc| doc.set_cookie(raw).ok())
            .is_some()
    }
}

impl CookieStore for BrowserCookies {
    fn get(&self, name: &str) -> Option<String> {
        let header = Self::document()?.cookie().ok()?;
        parse_cookie(&header, name)
    }

    fn set(&self, name: &str, value: &str) -> bool {
        Self::write(&format!("{}={}; path=/; SameSite=Lax", name, value))
    }

    fn remove(&self, name: &str) -> bool {
        Self::write(&format!("{}=; path=/; max-age=0; SameSite=Lax", name))
    }
}

/// 内存 cookie
#[derive(Debug, Default)]
pub struct MemoryCookies {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(pairs: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (name, value) in pairs {
            store.set(name, value);
        }
        store
    }
}

impl CookieStore for MemoryCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.values.lock().ok()?.get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) -> bool {
        self.values
            .lock()
            .map(|mut values| values.insert(name.to_string(), value.to_string()))
            .is_ok()
    }

    fn remove(&self, name: &str) -> bool {
        self.values
            .lock()
            .map(|mut values| values.remove(name))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie() {
        let header = "theme=dark; token=abc.def.ghi; setupComplete=true";
        assert_eq!(parse_cookie(header, "token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(parse_cookie(header, "setupComplete").as_deref(), Some("true"));
        assert_eq!(parse_cookie(header, "missing"), None);
        assert_eq!(parse_cookie("token=", "token"), None);
        assert_eq!(parse_cookie("", "token"), None);
    }

    #[test]
    fn test_memory_cookies() {
        let cookies = MemoryCookies::with(&[("token", "t1")]);
        assert_eq!(cookies.get("token").as_deref(), Some("t1"));
        assert!(cookies.remove("token"));
        assert_eq!(cookies.get("token"), None);
        // 删除不存在的键也算成功
        assert!(cookies.remove("token"));
    }
}
