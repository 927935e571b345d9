use louvor_shared::{SongVersion, SongVersionForm, non_blank};

use super::{remove_by_key, replace_by_key};
use crate::api::ApiClient;
use crate::notify::Notice;

/// 版本表单的原始输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionDraft {
    pub version_name: String,
    pub classification: String,
    pub key: String,
    pub link_chord: String,
    pub link_video: String,
}

impl VersionDraft {
    pub fn from_version(version: &SongVersion) -> Self {
        Self {
            version_name: version.version_name.clone(),
            classification: version.classification.clone(),
            key: version.key.clone(),
            link_chord: version.link_chord.clone().unwrap_or_default(),
            link_video: version.link_video.clone().unwrap_or_default(),
        }
    }

    /// 名称、分类和调性必填；空链接视为未填写
    pub fn to_form(&self) -> Option<SongVersionForm> {
        Some(SongVersionForm {
            version_name: non_blank(&self.version_name)?,
            classification: non_blank(&self.classification)?,
            key: non_blank(&self.key)?,
            link_chord: non_blank(&self.link_chord),
            link_video: non_blank(&self.link_video),
        })
    }
}

const REQUIRED_FIELDS: &str = "Nome da versão, classificação e tom são obrigatórios.";

/// 歌曲版本页
#[derive(Debug, Clone, Default)]
pub struct SongVersionList {
    pub song_id: String,
    pub versions: Vec<SongVersion>,
    /// 详情弹窗中显示的版本
    pub selected: Option<SongVersion>,
    pub loading: bool,
}

impl SongVersionList {
    pub fn new(song_id: impl Into<String>) -> Self {
        Self {
            song_id: song_id.into(),
            ..Self::default()
        }
    }

    /// 加载版本列表；路由中带有版本 id 时同时打开详情
    pub async fn load(&mut self, api: &ApiClient, version_id: Option<&str>) -> Option<Notice> {
        self.loading = true;
        let result = api.get_song_versions(&self.song_id).await;
        self.loading = false;

        match result {
            Ok(versions) => self.versions = versions,
            Err(e) => {
                return Some(Notice::failure("Erro ao carregar as versões da música.", &e));
            }
        }

        match version_id {
            Some(version_id) => self.show_detail(api, version_id).await,
            None => None,
        }
    }

    pub async fn show_detail(&mut self, api: &ApiClient, version_id: &str) -> Option<Notice> {
        match api.get_song_version(&self.song_id, version_id).await {
            Ok(version) => {
                self.selected = Some(version);
                None
            }
            Err(e) => Some(Notice::failure(e.message.clone(), &e)),
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub async fn create(&mut self, api: &ApiClient, draft: &VersionDraft) -> Notice {
        let Some(form) = draft.to_form() else {
            return Notice::error(REQUIRED_FIELDS);
        };

        match api.create_song_version(&self.song_id, form).await {
            Ok(version) => {
                self.versions.push(version);
                Notice::success("Versão criada com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao criar a versão da música.", &e),
        }
    }

    pub async fn update(&mut self, api: &ApiClient, version_id: &str, draft: &VersionDraft) -> Notice {
        let Some(form) = draft.to_form() else {
            return Notice::error(REQUIRED_FIELDS);
        };

        match api.update_song_version(&self.song_id, version_id, form).await {
            Ok(version) => {
                if self.selected.as_ref().is_some_and(|s| s.id == version.id) {
                    self.selected = Some(version.clone());
                }
                replace_by_key(&mut self.versions, version);
                Notice::success("Versão atualizada com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao atualizar a versão.", &e),
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, version_id: &str) -> Notice {
        match api.delete_song_version(&self.song_id, version_id).await {
            Ok(()) => {
                remove_by_key(&mut self.versions, version_id);
                if self.selected.as_ref().is_some_and(|s| s.id == version_id) {
                    self.selected = None;
                }
                Notice::success("Versão excluída com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao excluir a versão.", &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use crate::pages::fixtures;
    use louvor_shared::protocol::HttpMethod;
    use serde_json::json;

    fn draft() -> VersionDraft {
        VersionDraft {
            version_name: "Acústica".to_string(),
            classification: "Ao vivo".to_string(),
            key: "D".to_string(),
            link_chord: " ".to_string(),
            link_video: "https://video".to_string(),
        }
    }

    #[test]
    fn test_draft_validation() {
        let form = draft().to_form().unwrap();
        assert_eq!(form.link_chord, None);
        assert_eq!(form.link_video.as_deref(), Some("https://video"));

        let missing_key = VersionDraft {
            key: String::new(),
            ..draft()
        };
        assert!(missing_key.to_form().is_none());
    }

    #[tokio::test]
    async fn test_load_with_routed_version_opens_detail() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(
            HttpMethod::Get,
            &url("/songs/4/song-versions"),
            200,
            json!([fixtures::version("1", "4", "Original"), fixtures::version("2", "4", "Live")]),
        );
        http.mock_response(
            HttpMethod::Get,
            &url("/songs/4/song-versions/2"),
            200,
            fixtures::version("2", "4", "Live"),
        );

        let mut page = SongVersionList::new("4");
        assert_eq!(page.load(&api, Some("2")).await, None);
        assert_eq!(page.versions.len(), 2);
        assert_eq!(page.selected.as_ref().map(|v| v.id.as_str()), Some("2"));
    }

    #[tokio::test]
    async fn test_detail_failure_uses_fixed_message() {
        let (api, _, _) = mock_api(&[]);
        let mut page = SongVersionList::new("4");

        let notice = page.show_detail(&api, "99").await.unwrap();
        assert_eq!(notice.message, "Não foi possível buscar a versão da música.");
        assert!(page.selected.is_none());
    }

    #[tokio::test]
    async fn test_create_sends_song_id_and_nulls() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(
            HttpMethod::Post,
            &url("/songs/4/song-versions"),
            201,
            fixtures::version("3", "4", "Acústica"),
        );

        let mut page = SongVersionList::new("4");
        let notice = page.create(&api, &draft()).await;
        assert!(!notice.is_error());
        assert_eq!(page.versions.len(), 1);

        let body = http.last_request().json_body();
        assert_eq!(body["songId"], "4");
        assert_eq!(body["linkChord"], json!(null));
        assert_eq!(body["key"], "D");
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let (api, http, _) = mock_api(&[]);
        let mut page = SongVersionList::new("4");
        let notice = page.create(&api, &VersionDraft::default()).await;
        assert_eq!(notice.message, REQUIRED_FIELDS);
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_delete_closes_detail() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(
            HttpMethod::Get,
            &url("/songs/4/song-versions"),
            200,
            json!([fixtures::version("1", "4", "Original")]),
        );
        http.mock_response(
            HttpMethod::Get,
            &url("/songs/4/song-versions/1"),
            200,
            fixtures::version("1", "4", "Original"),
        );
        http.mock_response(
            HttpMethod::Delete,
            &url("/songs/4/song-versions/1"),
            204,
            json!(null),
        );

        let mut page = SongVersionList::new("4");
        page.load(&api, Some("1")).await;
        page.delete(&api, "1").await;
        assert!(page.versions.is_empty());
        assert!(page.selected.is_none());
    }
}
