use crate::{
    AddParticipantRequest, AuthResponse, Department, DepartmentForm, LoginRequest,
    RegisterRequest, Schedule, ScheduleForm, SetupRequest, Song, SongForm, SongVersion,
    SongVersionForm, User, UserEnvelope,
};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Only POST and PUT carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Path parameters live on the request struct and are marked `#[serde(skip)]`,
/// so only the payload ends up in the body.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path, with parameters filled in.
    fn path(&self) -> String;
}

macro_rules! endpoint {
    ($req:ty => $resp:ty, $method:ident, |$this:ident| $path:expr) => {
        impl ApiRequest for $req {
            type Response = $resp;
            const METHOD: HttpMethod = HttpMethod::$method;
            fn path(&self) -> String {
                let $this = self;
                $path
            }
        }
    };
}

// =========================================================
// Auth & Setup
// =========================================================

endpoint!(RegisterRequest => AuthResponse, Post, |_r| "/register".to_string());
endpoint!(LoginRequest => AuthResponse, Post, |_r| "/login".to_string());
endpoint!(SetupRequest => serde_json::Value, Post, |_r| "/setup".to_string());

// =========================================================
// Users
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListUsers;
endpoint!(ListUsers => Vec<User>, Get, |_r| "/users".to_string());

#[derive(Debug, Serialize)]
pub struct GetUser {
    #[serde(skip)]
    pub user_id: String,
}
endpoint!(GetUser => UserEnvelope, Get, |r| format!("/users/{}", r.user_id));

// =========================================================
// Departments
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListDepartments;
endpoint!(ListDepartments => Vec<Department>, Get, |_r| "/departments".to_string());

#[derive(Debug, Serialize)]
pub struct GetDepartment {
    #[serde(skip)]
    pub department_id: String,
}
endpoint!(GetDepartment => Department, Get, |r| format!("/departments/{}", r.department_id));

#[derive(Debug, Serialize)]
pub struct CreateDepartment(pub DepartmentForm);
endpoint!(CreateDepartment => Department, Post, |_r| "/departments".to_string());

#[derive(Debug, Serialize)]
pub struct UpdateDepartment {
    #[serde(skip)]
    pub department_id: String,
    #[serde(flatten)]
    pub form: DepartmentForm,
}
endpoint!(UpdateDepartment => Department, Put, |r| format!("/departments/{}", r.department_id));

#[derive(Debug, Serialize)]
pub struct DeleteDepartment {
    #[serde(skip)]
    pub department_id: String,
}
endpoint!(DeleteDepartment => serde_json::Value, Delete, |r| format!("/departments/{}", r.department_id));

#[derive(Debug, Serialize)]
pub struct AddDepartmentMember {
    #[serde(skip)]
    pub department_id: String,
    #[serde(skip)]
    pub user_id: String,
}
endpoint!(AddDepartmentMember => serde_json::Value, Post, |r| format!(
    "/departments/{}/users/{}",
    r.department_id, r.user_id
));

// =========================================================
// Songs
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListSongs;
endpoint!(ListSongs => Vec<Song>, Get, |_r| "/songs".to_string());

#[derive(Debug, Serialize)]
pub struct CreateSong(pub SongForm);
endpoint!(CreateSong => Song, Post, |_r| "/songs".to_string());

#[derive(Debug, Serialize)]
pub struct UpdateSong {
    #[serde(skip)]
    pub song_id: String,
    #[serde(flatten)]
    pub form: SongForm,
}
endpoint!(UpdateSong => Song, Put, |r| format!("/songs/{}", r.song_id));

#[derive(Debug, Serialize)]
pub struct DeleteSong {
    #[serde(skip)]
    pub song_id: String,
}
endpoint!(DeleteSong => serde_json::Value, Delete, |r| format!("/songs/{}", r.song_id));

// =========================================================
// Song Versions
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListSongVersions {
    #[serde(skip)]
    pub song_id: String,
}
endpoint!(ListSongVersions => Vec<SongVersion>, Get, |r| format!(
    "/songs/{}/song-versions",
    r.song_id
));

#[derive(Debug, Serialize)]
pub struct GetSongVersion {
    #[serde(skip)]
    pub song_id: String,
    #[serde(skip)]
    pub version_id: String,
}
endpoint!(GetSongVersion => SongVersion, Get, |r| format!(
    "/songs/{}/song-versions/{}",
    r.song_id, r.version_id
));

/// The backend also expects `songId` inside the body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSongVersion {
    pub song_id: String,
    #[serde(flatten)]
    pub form: SongVersionForm,
}
endpoint!(CreateSongVersion => SongVersion, Post, |r| format!(
    "/songs/{}/song-versions",
    r.song_id
));

#[derive(Debug, Serialize)]
pub struct UpdateSongVersion {
    #[serde(skip)]
    pub song_id: String,
    #[serde(skip)]
    pub version_id: String,
    #[serde(flatten)]
    pub form: SongVersionForm,
}
endpoint!(UpdateSongVersion => SongVersion, Put, |r| format!(
    "/songs/{}/song-versions/{}",
    r.song_id, r.version_id
));

#[derive(Debug, Serialize)]
pub struct DeleteSongVersion {
    #[serde(skip)]
    pub song_id: String,
    #[serde(skip)]
    pub version_id: String,
}
endpoint!(DeleteSongVersion => serde_json::Value, Delete, |r| format!(
    "/songs/{}/song-versions/{}",
    r.song_id, r.version_id
));

// =========================================================
// Schedules
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListSchedules {
    #[serde(skip)]
    pub department_id: String,
}
endpoint!(ListSchedules => Vec<Schedule>, Get, |r| format!(
    "/departments/{}/schedules",
    r.department_id
));

#[derive(Debug, Serialize)]
pub struct GetSchedule {
    #[serde(skip)]
    pub department_id: String,
    #[serde(skip)]
    pub schedule_id: String,
}
endpoint!(GetSchedule => Schedule, Get, |r| format!(
    "/departments/{}/schedules/{}",
    r.department_id, r.schedule_id
));

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedule {
    pub department_id: String,
    pub name: String,
    pub date: DateTime<Utc>,
}
endpoint!(CreateSchedule => Schedule, Post, |r| format!(
    "/departments/{}/schedules",
    r.department_id
));

#[derive(Debug, Serialize)]
pub struct UpdateSchedule {
    #[serde(skip)]
    pub department_id: String,
    #[serde(skip)]
    pub schedule_id: String,
    #[serde(flatten)]
    pub form: ScheduleForm,
}
endpoint!(UpdateSchedule => Schedule, Put, |r| format!(
    "/departments/{}/schedules/{}",
    r.department_id, r.schedule_id
));

#[derive(Debug, Serialize)]
pub struct DeleteSchedule {
    #[serde(skip)]
    pub department_id: String,
    #[serde(skip)]
    pub schedule_id: String,
}
endpoint!(DeleteSchedule => serde_json::Value, Delete, |r| format!(
    "/departments/{}/schedules/{}",
    r.department_id, r.schedule_id
));

#[derive(Debug, Serialize)]
pub struct AddParticipant {
    #[serde(skip)]
    pub department_id: String,
    #[serde(skip)]
    pub schedule_id: String,
    #[serde(flatten)]
    pub body: AddParticipantRequest,
}
endpoint!(AddParticipant => Schedule, Post, |r| format!(
    "/departments/{}/schedules/{}/participants",
    r.department_id, r.schedule_id
));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParticipantStatus;
    use serde_json::json;

    #[test]
    fn test_path_params_stay_out_of_body() {
        let req = AddParticipant {
            department_id: "d1".to_string(),
            schedule_id: "s9".to_string(),
            body: AddParticipantRequest {
                user_id: "u1".to_string(),
                user_name: "Ana".to_string(),
                status: ParticipantStatus::Pending,
            },
        };
        assert_eq!(req.path(), "/departments/d1/schedules/s9/participants");
        assert_eq!(AddParticipant::METHOD, HttpMethod::Post);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"userId": "u1", "userName": "Ana", "status": "PENDING"})
        );
    }

    #[test]
    fn test_create_song_version_keeps_song_id_in_body() {
        let req = CreateSongVersion {
            song_id: "42".to_string(),
            form: SongVersionForm {
                version_name: "Acústica".to_string(),
                classification: "Lenta".to_string(),
                key: "G".to_string(),
                link_chord: None,
                link_video: Some("https://video".to_string()),
            },
        };
        assert_eq!(req.path(), "/songs/42/song-versions");
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["songId"], "42");
        assert_eq!(body["linkChord"], serde_json::Value::Null);
        assert_eq!(body["key"], "G");
    }

    #[test]
    fn test_department_member_path() {
        let req = AddDepartmentMember {
            department_id: "3".to_string(),
            user_id: "7".to_string(),
        };
        assert_eq!(req.path(), "/departments/3/users/7");
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({}));
        assert!(!DeleteDepartment::METHOD.has_body());
        assert!(UpdateDepartment::METHOD.has_body());
    }
}
