//! 认证模块
//!
//! 管理用户会话，与路由系统解耦。
//! 会话本身是一个普通的值 (`Session`)，所有改变会话的操作都由 `SessionManager`
//! 完成并返回新的会话；Leptos 层只负责把新会话写入 `AuthContext`。
//! 路由服务通过注入的会话信号来求值守卫。

use leptos::prelude::*;
use louvor_shared::{
    COOKIE_SETUP_COMPLETE, COOKIE_TOKEN, RegisterRequest, Role, decode_claims, non_blank,
};

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::web::CookieStore;

/// 当前会话
///
/// `user_id` 取自 token 载荷中的 `sub`，客户端不验证签名，只用于显示和拼接路径。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub has_completed_setup: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// 从 cookie 恢复会话
    ///
    /// 无法解码的 token 会被删除，会话保持匿名。
    pub fn restore(cookies: &dyn CookieStore) -> Self {
        let Some(token) = cookies.get(COOKIE_TOKEN) else {
            return Self::default();
        };

        match decode_claims(&token) {
            Ok(claims) => Self {
                token: Some(token),
                user_id: Some(claims.sub),
                has_completed_setup: cookies.get(COOKIE_SETUP_COMPLETE).is_some(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session cookie");
                cookies.remove(COOKIE_TOKEN);
                cookies.remove(COOKIE_SETUP_COMPLETE);
                Self::default()
            }
        }
    }

    fn from_token(token: String, has_completed_setup: bool) -> ApiResult<Self> {
        let claims = decode_claims(&token)?;
        Ok(Self {
            token: Some(token),
            user_id: Some(claims.sub),
            has_completed_setup,
        })
    }
}

/// 会话管理器
///
/// 负责与 `/register`、`/login`、`/setup` 交互并维护 cookie。
#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
}

impl SessionManager {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn cookies(&self) -> &dyn CookieStore {
        self.api.cookies()
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ApiResult<Session> {
        let req = RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password_hash: password.to_string(),
            avatar_url: None,
        };
        let res = self.api.register(req).await?;
        let token = res
            .token
            .ok_or_else(|| ApiError::unauthorized("Falha no cadastro"))?;

        let session = Session::from_token(token.clone(), false)?;
        self.cookies().set(COOKIE_TOKEN, &token);
        self.cookies().remove(COOKIE_SETUP_COMPLETE);

        tracing::info!(user = ?session.user_id, "registered");
        Ok(session)
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let res = self.api.login(email.trim(), password).await?;
        let setup_completed = res.setup_completed();
        let token = res
            .token
            .ok_or_else(|| ApiError::unauthorized("Falha no login"))?;

        let session = Session::from_token(token.clone(), setup_completed)
            .map_err(|e| e.context("Falha no login"))?;

        self.cookies().set(COOKIE_TOKEN, &token);
        if setup_completed {
            self.cookies().set(COOKIE_SETUP_COMPLETE, "true");
        } else {
            self.cookies().remove(COOKIE_SETUP_COMPLETE);
        }

        tracing::info!(user = ?session.user_id, setup_completed, "logged in");
        Ok(session)
    }

    /// 清除 cookie 并返回匿名会话，总是成功
    pub fn logout(&self) -> Session {
        self.cookies().remove(COOKIE_TOKEN);
        self.cookies().remove(COOKIE_SETUP_COMPLETE);
        tracing::info!("logged out");
        Session::default()
    }

    /// 标记设置完成（幂等）
    pub fn complete_setup(&self, session: &Session) -> Session {
        self.cookies().set(COOKIE_SETUP_COMPLETE, "true");
        Session {
            has_completed_setup: true,
            ..session.clone()
        }
    }

    /// 提交首次设置，成功后标记设置完成
    pub async fn submit_setup(
        &self,
        session: &Session,
        role: Role,
        code: &str,
    ) -> ApiResult<Session> {
        let user_id = session
            .user_id
            .as_deref()
            .ok_or_else(|| ApiError::invalid_input("Usuário não identificado."))?;

        self.api
            .complete_setup(user_id, role, non_blank(code))
            .await?;
        Ok(self.complete_setup(session))
    }
}

// =========================================================
// Leptos 上下文
// =========================================================

/// 认证状态
#[derive(Clone, Default)]
pub struct AuthState {
    pub session: Session,
    /// 是否正在等待登录/注册/设置请求
    pub is_loading: bool,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
    manager: StoredValue<SessionManager>,
}

impl AuthContext {
    pub fn new(api: ApiClient) -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self {
            state,
            set_state,
            manager: StoredValue::new(SessionManager::new(api)),
        }
    }

    /// 获取会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        let state = self.state;
        Signal::derive(move || state.get().session)
    }

    pub fn session(&self) -> Session {
        self.state.get_untracked().session
    }

    pub fn manager(&self) -> SessionManager {
        self.manager.get_value()
    }

    fn apply(&self, result: ApiResult<Session>) -> ApiResult<()> {
        self.set_state.update(|state| {
            state.is_loading = false;
            if let Ok(session) = &result {
                state.session = session.clone();
            }
        });
        result.map(|_| ())
    }

    fn start_loading(&self) {
        self.set_state.update(|state| state.is_loading = true);
    }

    pub async fn register(&self, name: String, email: String, password: String) -> ApiResult<()> {
        self.start_loading();
        let result = self.manager().register(&name, &email, &password).await;
        self.apply(result)
    }

    pub async fn login(&self, email: String, password: String) -> ApiResult<()> {
        self.start_loading();
        let result = self.manager().login(&email, &password).await;
        self.apply(result)
    }

    /// 写入由其他操作（如首次设置）得到的新会话
    pub fn set_session(&self, session: Session) {
        self.set_state.set(AuthState {
            session,
            is_loading: false,
        });
    }

    /// 注销并清除状态
    ///
    /// 导航由路由服务对会话信号的监听自动处理。
    pub fn logout(&self) {
        let session = self.manager().logout();
        self.set_state.set(AuthState {
            session,
            is_loading: false,
        });
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态：从 cookie 恢复会话
pub fn init_auth(ctx: &AuthContext, cookies: &dyn CookieStore) {
    let session = Session::restore(cookies);
    tracing::debug!(authenticated = session.is_authenticated(), "session restored");
    ctx.set_state.set(AuthState {
        session,
        is_loading: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use crate::error::ErrorKind;
    use louvor_shared::protocol::HttpMethod;
    use serde_json::json;

    /// `{"sub":"user-2","exp":1900000000}`
    const TOKEN_USER_2: &str =
        "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ1c2VyLTIiLCJleHAiOjE5MDAwMDAwMDB9.sig";

    #[tokio::test]
    async fn test_login_decodes_subject() {
        let (api, http, cookies) = mock_api(&[]);
        http.mock_response(
            HttpMethod::Post,
            &url("/login"),
            200,
            json!({"token": TOKEN_USER_2, "user": {"initialSetupCompleted": true}}),
        );

        let session = SessionManager::new(api)
            .login(" ana@igreja.com ", "segredo")
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.user_id.as_deref(), Some("user-2"));
        assert!(session.has_completed_setup);
        assert_eq!(cookies.get("token").as_deref(), Some(TOKEN_USER_2));
        assert_eq!(cookies.get("setupComplete").as_deref(), Some("true"));
        assert_eq!(
            http.last_request().json_body(),
            json!({"email": "ana@igreja.com", "password": "segredo"})
        );
    }

    #[tokio::test]
    async fn test_login_without_setup_clears_stale_flag() {
        let (api, http, cookies) = mock_api(&[("setupComplete", "true")]);
        http.mock_response(
            HttpMethod::Post,
            &url("/login"),
            200,
            json!({"token": TOKEN_USER_1, "user": {"initialSetupCompleted": false}}),
        );

        let session = SessionManager::new(api).login("a@b.c", "x").await.unwrap();
        assert!(!session.has_completed_setup);
        assert_eq!(cookies.get("setupComplete"), None);
    }

    #[tokio::test]
    async fn test_login_without_token_fails() {
        let (api, http, cookies) = mock_api(&[]);
        http.mock_response(HttpMethod::Post, &url("/login"), 200, json!({}));

        let err = SessionManager::new(api).login("a@b.c", "x").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "Falha no login");
        assert_eq!(cookies.get("token"), None);
    }

    #[tokio::test]
    async fn test_login_with_malformed_token_fails() {
        let (api, http, cookies) = mock_api(&[]);
        http.mock_response(HttpMethod::Post, &url("/login"), 200, json!({"token": "garbage"}));

        let err = SessionManager::new(api).login("a@b.c", "x").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(cookies.get("token"), None);
    }

    #[tokio::test]
    async fn test_login_rejected_by_server() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(HttpMethod::Post, &url("/login"), 401, json!("Credenciais inválidas"));

        let err = SessionManager::new(api).login("a@b.c", "x").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_register_marks_setup_incomplete() {
        let (api, http, cookies) = mock_api(&[("setupComplete", "true")]);
        http.mock_response(
            HttpMethod::Post,
            &url("/register"),
            201,
            json!({"token": TOKEN_USER_1}),
        );

        let session = SessionManager::new(api)
            .register("Ana", "ana@igreja.com", "hash")
            .await
            .unwrap();

        assert_eq!(session.user_id.as_deref(), Some("user-1"));
        assert!(!session.has_completed_setup);
        assert_eq!(cookies.get("setupComplete"), None);
        assert_eq!(
            http.last_request().json_body(),
            json!({"name": "Ana", "email": "ana@igreja.com", "passwordHash": "hash"})
        );
    }

    #[tokio::test]
    async fn test_register_propagates_validation_errors() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(HttpMethod::Post, &url("/register"), 400, json!("E-mail já cadastrado"));

        let err = SessionManager::new(api)
            .register("Ana", "ana@igreja.com", "hash")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_logout_always_clears_session() {
        let (api, _, cookies) = mock_api(&[("token", TOKEN_USER_1), ("setupComplete", "true")]);
        let manager = SessionManager::new(api);

        let session = manager.logout();
        assert_eq!(session, Session::default());
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id, None);
        assert_eq!(cookies.get("token"), None);
        assert_eq!(cookies.get("setupComplete"), None);

        // 重复注销依然成功
        assert_eq!(manager.logout(), Session::default());
    }

    #[test]
    fn test_complete_setup_is_idempotent() {
        let (api, _, cookies) = mock_api(&[("token", TOKEN_USER_1)]);
        let manager = SessionManager::new(api);
        let session = Session::restore(&*cookies);

        let once = manager.complete_setup(&session);
        let twice = manager.complete_setup(&once);
        assert!(once.has_completed_setup);
        assert_eq!(once, twice);
        assert_eq!(cookies.get("setupComplete").as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_submit_setup_posts_user_and_role() {
        let (api, http, cookies) = mock_api(&[("token", TOKEN_USER_1)]);
        http.mock_response(HttpMethod::Post, &url("/setup"), 200, json!({"ok": true}));
        let session = Session::restore(&*cookies);

        let session = SessionManager::new(api)
            .submit_setup(&session, Role::Leader, " LOUVOR1 ")
            .await
            .unwrap();

        assert!(session.has_completed_setup);
        assert_eq!(
            http.last_request().json_body(),
            json!({"userId": "user-1", "role": "LEADER", "code": "LOUVOR1"})
        );
    }

    #[tokio::test]
    async fn test_submit_setup_requires_user() {
        let (api, http, _) = mock_api(&[]);
        let err = SessionManager::new(api)
            .submit_setup(&Session::default(), Role::Member, "")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert!(http.requests().is_empty());
    }

    #[test]
    fn test_restore_from_cookies() {
        let (_, _, cookies) = mock_api(&[("token", TOKEN_USER_1), ("setupComplete", "true")]);
        let session = Session::restore(&*cookies);
        assert!(session.is_authenticated());
        assert_eq!(session.user_id.as_deref(), Some("user-1"));
        assert!(session.has_completed_setup);

        let (_, _, empty) = mock_api(&[("setupComplete", "true")]);
        assert_eq!(Session::restore(&*empty), Session::default());
    }

    #[test]
    fn test_restore_drops_malformed_token() {
        let (_, _, cookies) = mock_api(&[("token", "not-a-jwt"), ("setupComplete", "true")]);
        let session = Session::restore(&*cookies);
        assert_eq!(session, Session::default());
        assert_eq!(cookies.get("token"), None);
        assert_eq!(cookies.get("setupComplete"), None);
    }
}
