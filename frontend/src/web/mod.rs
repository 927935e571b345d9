//! 浏览器原生 API 封装模块
//!
//! 对 fetch、cookie 和 History API 的轻量级封装。

mod cookie;
mod http;
pub mod route;
pub mod router;

pub use cookie::{BrowserCookies, CookieStore, MemoryCookies, parse_cookie};
pub use http::{FetchHttpClient, HttpClient, HttpRequest, HttpResponse};

#[cfg(test)]
pub use http::{MockHttpClient, RecordedRequest};
