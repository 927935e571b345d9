//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、路由守卫条件以及守卫的求值。

use std::fmt::Display;

use crate::auth::Session;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 注册页面 (默认路由)
    #[default]
    Register,
    Login,
    /// 首次注册后的设置步骤
    Setup,
    Dashboard,
    Departments,
    Department {
        id: String,
    },
    Schedules {
        department_id: String,
    },
    Schedule {
        department_id: String,
        schedule_id: String,
    },
    Songs,
    SongVersions {
        song_id: String,
    },
    SongVersion {
        song_id: String,
        version_id: String,
    },
    Profile {
        user_id: String,
    },
    /// 未匹配的路径
    NotFound,
}

/// 路由守卫条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// 登录/注册：已登录用户应离开
    Public,
    /// 仅限已登录但尚未完成设置的用户
    SetupPending,
    /// 已登录且已完成设置
    Member,
    /// 始终重定向
    Fallback,
}

/// 守卫求值结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// 可以渲染目标路由
    Render(AppRoute),
    /// 需要重定向到新路由（已是最终可渲染的路由）
    Redirect(AppRoute),
}

impl Navigation {
    pub fn route(&self) -> &AppRoute {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }

    pub fn into_route(self) -> AppRoute {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let own = |s: &str| s.to_string();

        match segments.as_slice() {
            [] | ["register"] => Self::Register,
            ["login"] => Self::Login,
            ["setup"] => Self::Setup,
            ["dashboard"] => Self::Dashboard,
            ["departments"] => Self::Departments,
            ["departments", id] => Self::Department { id: own(id) },
            ["departments", id, "schedules"] => Self::Schedules {
                department_id: own(id),
            },
            ["departments", id, "schedules", sid] => Self::Schedule {
                department_id: own(id),
                schedule_id: own(sid),
            },
            ["songs"] => Self::Songs,
            ["songs", id, "song-versions"] => Self::SongVersions { song_id: own(id) },
            ["songs", id, "song-versions", vid] => Self::SongVersion {
                song_id: own(id),
                version_id: own(vid),
            },
            ["users", id] => Self::Profile { user_id: own(id) },
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Register => "/register".to_string(),
            Self::Login => "/login".to_string(),
            Self::Setup => "/setup".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Departments => "/departments".to_string(),
            Self::Department { id } => format!("/departments/{}", id),
            Self::Schedules { department_id } => {
                format!("/departments/{}/schedules", department_id)
            }
            Self::Schedule {
                department_id,
                schedule_id,
            } => format!("/departments/{}/schedules/{}", department_id, schedule_id),
            Self::Songs => "/songs".to_string(),
            Self::SongVersions { song_id } => format!("/songs/{}/song-versions", song_id),
            Self::SongVersion {
                song_id,
                version_id,
            } => format!("/songs/{}/song-versions/{}", song_id, version_id),
            Self::Profile { user_id } => format!("/users/{}", user_id),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由的访问条件**
    pub fn guard(&self) -> Guard {
        match self {
            Self::Register | Self::Login => Guard::Public,
            Self::Setup => Guard::SetupPending,
            Self::NotFound => Guard::Fallback,
            _ => Guard::Member,
        }
    }

    /// 在当前会话下，守卫不满足时应跳转的路由
    fn redirect_for(&self, session: &Session) -> Option<AppRoute> {
        let authed = session.is_authenticated();
        let setup_done = session.has_completed_setup;

        match self.guard() {
            Guard::Fallback => Some(Self::Register),
            Guard::Public if authed && setup_done => Some(Self::Dashboard),
            Guard::Public if authed => Some(Self::Setup),
            Guard::SetupPending if !authed => Some(Self::Login),
            Guard::SetupPending if setup_done => Some(Self::Dashboard),
            Guard::Member if !authed => Some(Self::Login),
            Guard::Member if !setup_done => Some(Self::Setup),
            _ => None,
        }
    }
}

/// 守卫求值：跟随重定向直到得到一个可渲染的路由
///
/// 只依赖会话状态，没有任何副作用。
pub fn resolve(target: AppRoute, session: &Session) -> Navigation {
    let mut current = target;
    let mut redirected = false;

    // 守卫链最多三跳 (NotFound -> Register -> Setup/Dashboard)
    for _ in 0..4 {
        match current.redirect_for(session) {
            Some(next) => {
                current = next;
                redirected = true;
            }
            None if redirected => return Navigation::Redirect(current),
            None => return Navigation::Render(current),
        }
    }

    // 守卫规则自洽时不会到达这里
    tracing::error!(route = %current, "route guard did not settle");
    Navigation::Redirect(AppRoute::Login)
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
