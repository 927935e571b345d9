use std::sync::Arc;

use chrono::{DateTime, Utc};
use louvor_shared::protocol::*;
use louvor_shared::{
    AddParticipantRequest, AuthResponse, COOKIE_TOKEN, Department, DepartmentForm,
    HEADER_AUTHORIZATION, LoginRequest, ParticipantStatus, RegisterRequest, Role, Schedule,
    ScheduleForm, SetupRequest, Song, SongForm, SongVersion, SongVersionForm, User, bearer,
};

use crate::error::ApiResult;
use crate::web::{CookieStore, HttpClient, HttpRequest};

/// 后端 API 客户端
///
/// 每次请求都从 cookie 中读取当前 token 并附加 Bearer 头。
/// 不做重试、缓存或去重，错误原样返回给调用方。
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    cookies: Arc<dyn CookieStore>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        http: Arc<dyn HttpClient>,
        cookies: Arc<dyn CookieStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            cookies,
        }
    }

    pub fn cookies(&self) -> &dyn CookieStore {
        self.cookies.as_ref()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送任意 `ApiRequest`
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let path = req.path();
        let mut http_req = HttpRequest::new(&self.url(&path), R::METHOD);

        if let Some(token) = self.cookies.get(COOKIE_TOKEN) {
            http_req = http_req.with_header(HEADER_AUTHORIZATION, &bearer(&token));
        }
        if R::METHOD.has_body() {
            http_req = http_req
                .with_header("Content-Type", "application/json")
                .with_body(serde_json::to_string(req)?);
        }

        let res = self.http.send(http_req).await?;
        if !res.ok() {
            let err = crate::error::ApiError::from_response(res.status, &res.body);
            tracing::warn!(
                method = R::METHOD.as_str(),
                %path,
                code = err.error_code(),
                "request failed"
            );
            return Err(err);
        }
        res.json::<R::Response>()
    }

    // =========================================================
    // Auth & Setup
    // =========================================================

    pub async fn register(&self, req: RegisterRequest) -> ApiResult<AuthResponse> {
        self.send(&req).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send(&req).await
    }

    pub async fn complete_setup(
        &self,
        user_id: &str,
        role: Role,
        code: Option<String>,
    ) -> ApiResult<()> {
        let req = SetupRequest {
            user_id: user_id.to_string(),
            role,
            code,
        };
        self.send(&req).await.map(|_| ())
    }

    // =========================================================
    // Users
    // =========================================================

    pub async fn get_users(&self) -> ApiResult<Vec<User>> {
        self.send(&ListUsers).await
    }

    pub async fn get_user(&self, user_id: &str) -> ApiResult<User> {
        let req = GetUser {
            user_id: user_id.to_string(),
        };
        self.send(&req).await.map(|envelope| envelope.user)
    }

    // =========================================================
    // Departments
    // =========================================================

    pub async fn get_departments(&self) -> ApiResult<Vec<Department>> {
        self.send(&ListDepartments).await
    }

    pub async fn get_department(&self, department_id: &str) -> ApiResult<Department> {
        let req = GetDepartment {
            department_id: department_id.to_string(),
        };
        self.send(&req).await
    }

    pub async fn create_department(&self, form: DepartmentForm) -> ApiResult<Department> {
        self.send(&CreateDepartment(form)).await
    }

    pub async fn update_department(
        &self,
        department_id: &str,
        form: DepartmentForm,
    ) -> ApiResult<Department> {
        let req = UpdateDepartment {
            department_id: department_id.to_string(),
            form,
        };
        self.send(&req).await
    }

    pub async fn delete_department(&self, department_id: &str) -> ApiResult<()> {
        let req = DeleteDepartment {
            department_id: department_id.to_string(),
        };
        self.send(&req).await.map(|_| ())
    }

    pub async fn add_department_member(&self, department_id: &str, user_id: &str) -> ApiResult<()> {
        let req = AddDepartmentMember {
            department_id: department_id.to_string(),
            user_id: user_id.to_string(),
        };
        self.send(&req).await.map(|_| ())
    }

    // =========================================================
    // Songs
    // =========================================================

    pub async fn get_songs(&self) -> ApiResult<Vec<Song>> {
        self.send(&ListSongs).await
    }

    pub async fn create_song(&self, form: SongForm) -> ApiResult<Song> {
        self.send(&CreateSong(form)).await
    }

    pub async fn update_song(&self, song_id: &str, form: SongForm) -> ApiResult<Song> {
        let req = UpdateSong {
            song_id: song_id.to_string(),
            form,
        };
        self.send(&req).await
    }

    pub async fn delete_song(&self, song_id: &str) -> ApiResult<()> {
        let req = DeleteSong {
            song_id: song_id.to_string(),
        };
        self.send(&req).await.map(|_| ())
    }

    // =========================================================
    // Song Versions
    // =========================================================

    pub async fn get_song_versions(&self, song_id: &str) -> ApiResult<Vec<SongVersion>> {
        let req = ListSongVersions {
            song_id: song_id.to_string(),
        };
        self.send(&req).await
    }

    pub async fn get_song_version(&self, song_id: &str, version_id: &str) -> ApiResult<SongVersion> {
        let req = GetSongVersion {
            song_id: song_id.to_string(),
            version_id: version_id.to_string(),
        };
        self.send(&req)
            .await
            .map_err(|e| e.context("Não foi possível buscar a versão da música."))
    }

    pub async fn create_song_version(
        &self,
        song_id: &str,
        form: SongVersionForm,
    ) -> ApiResult<SongVersion> {
        let req = CreateSongVersion {
            song_id: song_id.to_string(),
            form,
        };
        self.send(&req).await
    }

    pub async fn update_song_version(
        &self,
        song_id: &str,
        version_id: &str,
        form: SongVersionForm,
    ) -> ApiResult<SongVersion> {
        let req = UpdateSongVersion {
            song_id: song_id.to_string(),
            version_id: version_id.to_string(),
            form,
        };
        self.send(&req).await
    }

    pub async fn delete_song_version(&self, song_id: &str, version_id: &str) -> ApiResult<()> {
        let req = DeleteSongVersion {
            song_id: song_id.to_string(),
            version_id: version_id.to_string(),
        };
        self.send(&req).await.map(|_| ())
    }

    // =========================================================
    // Schedules
    // =========================================================

    pub async fn get_schedules(&self, department_id: &str) -> ApiResult<Vec<Schedule>> {
        let req = ListSchedules {
            department_id: department_id.to_string(),
        };
        self.send(&req).await
    }

    pub async fn get_schedule(&self, department_id: &str, schedule_id: &str) -> ApiResult<Schedule> {
        let req = GetSchedule {
            department_id: department_id.to_string(),
            schedule_id: schedule_id.to_string(),
        };
        self.send(&req)
            .await
            .map_err(|e| e.context("Schedule not found."))
    }

    pub async fn create_schedule(
        &self,
        department_id: &str,
        name: &str,
        date: DateTime<Utc>,
    ) -> ApiResult<Schedule> {
        let req = CreateSchedule {
            department_id: department_id.to_string(),
            name: name.to_string(),
            date,
        };
        self.send(&req).await
    }

    pub async fn update_schedule(
        &self,
        department_id: &str,
        schedule_id: &str,
        form: ScheduleForm,
    ) -> ApiResult<Schedule> {
        let req = UpdateSchedule {
            department_id: department_id.to_string(),
            schedule_id: schedule_id.to_string(),
            form,
        };
        self.send(&req).await
    }

    pub async fn delete_schedule(&self, department_id: &str, schedule_id: &str) -> ApiResult<()> {
        let req = DeleteSchedule {
            department_id: department_id.to_string(),
            schedule_id: schedule_id.to_string(),
        };
        self.send(&req).await.map(|_| ())
    }

    pub async fn add_participant(
        &self,
        department_id: &str,
        schedule_id: &str,
        user: &User,
        status: ParticipantStatus,
    ) -> ApiResult<Schedule> {
        let req = AddParticipant {
            department_id: department_id.to_string(),
            schedule_id: schedule_id.to_string(),
            body: AddParticipantRequest {
                user_id: user.id.clone(),
                user_name: user.name.clone(),
                status,
            },
        };
        self.send(&req)
            .await
            .map_err(|e| e.context("Failed to add participant."))
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> ApiClient {
    leptos::prelude::use_context::<ApiClient>().expect("ApiClient should be provided")
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[tokio::test]
    async fn test_attaches_bearer_from_cookie() {
        let (api, http, _) = mock_api(&[("token", "abc")]);
        http.mock_response(HttpMethod::Get, &url("/songs"), 200, json!([]));

        let songs = api.get_songs().await.unwrap();
        assert!(songs.is_empty());

        let req = http.last_request();
        assert_eq!(req.url, "http://api.test/songs");
        assert_eq!(
            req.headers.get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
        assert!(req.body.is_none());
        assert!(!req.headers.contains_key("Content-Type"));
    }

    #[tokio::test]
    async fn test_reads_token_per_request() {
        let (api, http, cookies) = mock_api(&[]);
        http.mock_response(HttpMethod::Get, &url("/songs"), 200, json!([]));

        api.get_songs().await.unwrap();
        assert!(!http.last_request().headers.contains_key("Authorization"));

        cookies.set("token", "fresh");
        api.get_songs().await.unwrap();
        assert_eq!(
            http.last_request().headers.get("Authorization").map(String::as_str),
            Some("Bearer fresh")
        );
    }

    #[tokio::test]
    async fn test_json_body_on_post() {
        let (api, http, _) = mock_api(&[("token", "abc")]);
        http.mock_response(
            HttpMethod::Post,
            &url("/songs"),
            201,
            json!({"id": "s1", "title": "Oceans", "artist": "Hillsong"}),
        );

        let song = api
            .create_song(SongForm {
                title: "Oceans".to_string(),
                artist: "Hillsong".to_string(),
                genre: None,
            })
            .await
            .unwrap();
        assert_eq!(song.id, "s1");

        let req = http.last_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(req.json_body(), json!({"title": "Oceans", "artist": "Hillsong"}));
    }

    #[tokio::test]
    async fn test_error_status_is_mapped() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(HttpMethod::Get, &url("/departments"), 401, json!("token expirado"));

        let err = api.get_departments().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.status, Some(401));
        assert_eq!(err.message, "token expirado");
    }

    #[tokio::test]
    async fn test_fixed_messages_for_wrapped_endpoints() {
        let (api, _, _) = mock_api(&[]);

        let err = api.get_schedule("d1", "s1").await.unwrap_err();
        assert_eq!(err.message, "Schedule not found.");
        assert!(err.is_not_found());

        let err = api.get_song_version("1", "2").await.unwrap_err();
        assert_eq!(err.message, "Não foi possível buscar a versão da música.");
    }

    #[tokio::test]
    async fn test_delete_with_empty_body() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(HttpMethod::Delete, &url("/songs/9"), 204, serde_json::Value::Null);

        api.delete_song("9").await.unwrap();
        assert_eq!(http.last_request().url, "http://api.test/songs/9");
    }

    #[tokio::test]
    async fn test_delete_accepts_any_json_body() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(
            HttpMethod::Delete,
            &url("/songs/9/song-versions/3"),
            200,
            json!({"id": "3", "versionName": "Ao vivo"}),
        );
        http.mock_response(
            HttpMethod::Delete,
            &url("/departments/d1/schedules/s1"),
            200,
            json!({"message": "Schedule deleted"}),
        );

        api.delete_song_version("9", "3").await.unwrap();
        api.delete_schedule("d1", "s1").await.unwrap();
    }

    #[tokio::test]
    async fn test_get_user_unwraps_envelope() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(
            HttpMethod::Get,
            &url("/users/7"),
            200,
            json!({"user": {"id": "7", "name": "Davi", "role": "LEADER"}}),
        );

        let user = api.get_user("7").await.unwrap();
        assert_eq!(user.name, "Davi");
        assert_eq!(user.role, Some(Role::Leader));
    }

    #[tokio::test]
    async fn test_network_errors_propagate() {
        let (api, http, _) = mock_api(&[]);
        http.go_offline();
        let err = api.get_users().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
    }
}
