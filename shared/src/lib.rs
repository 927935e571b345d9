use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub mod date;
pub mod protocol;
pub mod token;

pub use date::ScheduleFilter;
pub use token::{TokenClaims, TokenError, decode_claims};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const COOKIE_TOKEN: &str = "token";
pub const COOKIE_SETUP_COMPLETE: &str = "setupComplete";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 构造 Bearer 认证头的值
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

// =========================================================
// ID 兼容 (后端历史版本中 id 可能是数字)
// =========================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    RawId::deserialize(d).map(String::from)
}

pub(crate) fn de_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(d).map(|v| v.map(String::from))
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Leader,
    #[default]
    #[serde(alias = "USER")]
    Member,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Leader, Role::Member];

    /// 序列化使用的线上值
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Leader => "LEADER",
            Role::Member => "MEMBER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Leader => "Líder",
            Role::Member => "Membro",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "LEADER" => Some(Role::Leader),
            "MEMBER" | "USER" => Some(Role::Member),
            _ => None,
        }
    }
}

/// 取姓名每个单词的首字母（大写），名字为空时返回 "?"
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub department_id: Option<String>,
}

impl User {
    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    pub fn belongs_to(&self, department_id: &str) -> bool {
        self.department_id.as_deref() == Some(department_id)
    }
}

/// 参与者/成员的精简信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub users: Option<Vec<User>>,
}

impl Department {
    pub fn member_count(&self) -> usize {
        self.users.as_ref().map_or(0, Vec::len)
    }

    pub fn member_label(&self) -> String {
        format!("{} membros", self.member_count())
    }

    pub fn members(&self) -> &[User] {
        self.users.as_deref().unwrap_or_default()
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.members().iter().any(|u| u.id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 曲目库中可选的风格
pub const SONG_GENRES: [&str; 3] = ["Worship", "Animada", "Pular"];

/// 日程中引用的歌曲（后端只返回基本字段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongSummary {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongVersion {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_id")]
    pub song_id: String,
    pub version_name: String,
    pub classification: String,
    pub key: String,
    #[serde(default)]
    pub link_chord: Option<String>,
    #[serde(default)]
    pub link_video: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    Accepted,
    #[default]
    Pending,
    Rejected,
}

impl ParticipantStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ParticipantStatus::Accepted => "Confirmado",
            ParticipantStatus::Pending => "Confirmação pendente",
            ParticipantStatus::Rejected => "Recusado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub user: MemberSummary,
    pub status: ParticipantStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(deserialize_with = "de_id")]
    pub department_id: String,
    #[serde(default)]
    pub songs: Option<Vec<SongSummary>>,
    #[serde(default)]
    pub participants: Option<Vec<Participant>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Schedule {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date > now
    }

    pub fn participants(&self) -> &[Participant] {
        self.participants.as_deref().unwrap_or_default()
    }

    pub fn songs(&self) -> &[SongSummary] {
        self.songs.as_deref().unwrap_or_default()
    }

    pub fn participant_count(&self) -> usize {
        self.participants().len()
    }

    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants().iter().any(|p| p.user.id == user_id)
    }
}

// =========================================================
// 请求/响应载荷 (Payloads)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(default)]
    pub initial_setup_completed: bool,
}

/// `/register` 和 `/login` 的响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

impl AuthResponse {
    pub fn setup_completed(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.initial_setup_completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongForm {
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongVersionForm {
    pub version_name: String,
    pub classification: String,
    pub key: String,
    pub link_chord: Option<String>,
    pub link_video: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleForm {
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddParticipantRequest {
    pub user_id: String,
    pub user_name: String,
    pub status: ParticipantStatus,
}

/// 将空白字符串归一化为 None
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
