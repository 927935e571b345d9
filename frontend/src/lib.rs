//! 敬拜事工管理前端
//!
//! 采用 Context-Driven 的架构：
//! - `web::route`: 路由定义与守卫（纯逻辑）
//! - `web::router`: 路由服务（History API）
//! - `auth`: 会话管理
//! - `api`: 后端 REST 客户端
//! - `pages`: 页面控制器（状态 + 操作，可脱离 DOM 测试）
//! - `components`: UI 组件层

mod api;
mod auth;
mod components;
mod config;
mod error;
mod logging;
mod notify;
mod pages;
pub(crate) mod web;

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::department_detail::DepartmentDetailPage;
use crate::components::departments::DepartmentsPage;
use crate::components::login::LoginPage;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::schedule_detail::ScheduleDetailPage;
use crate::components::schedules::SchedulesPage;
use crate::components::setup::SetupPage;
use crate::components::song_versions::SongVersionsPage;
use crate::components::songs::SongsPage;
use crate::config::AppConfig;
use crate::notify::{NoticeOutlet, Notifier};
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};
use crate::web::{BrowserCookies, FetchHttpClient};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Setup => view! { <SetupPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Departments => view! { <DepartmentsPage /> }.into_any(),
        AppRoute::Department { id } => view! { <DepartmentDetailPage id=id /> }.into_any(),
        AppRoute::Schedules { department_id } => {
            view! { <SchedulesPage department_id=department_id /> }.into_any()
        }
        AppRoute::Schedule {
            department_id,
            schedule_id,
        } => view! {
            <ScheduleDetailPage department_id=department_id schedule_id=schedule_id />
        }
        .into_any(),
        AppRoute::Songs => view! { <SongsPage /> }.into_any(),
        AppRoute::SongVersions { song_id } => {
            view! { <SongVersionsPage song_id=song_id version_id=None /> }.into_any()
        }
        AppRoute::SongVersion {
            song_id,
            version_id,
        } => view! { <SongVersionsPage song_id=song_id version_id=Some(version_id) /> }.into_any(),
        AppRoute::Profile { user_id } => view! { <ProfilePage user_id=user_id /> }.into_any(),
        // 守卫总会把未知路径重定向，这里只是兜底
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página não encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置与日志
    let config = AppConfig::from_build_env();
    logging::init(&config);

    // 2. 后端客户端
    let api = ApiClient::new(
        config.api_base_url.clone(),
        Arc::new(FetchHttpClient),
        Arc::new(BrowserCookies),
    );
    provide_context(api.clone());

    // 3. 认证上下文，从 cookie 恢复会话
    let auth = AuthContext::new(api);
    init_auth(&auth, &BrowserCookies);
    provide_context(auth);

    provide_context(Notifier::new(config.notice_timeout));

    view! {
        // 4. 路由器：注入会话信号实现守卫
        <Router session=auth.session_signal()>
            <NoticeOutlet />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
