use louvor_shared::{Department, User};

use crate::api::ApiClient;
use crate::notify::Notice;

/// 部门详情页：显示成员
#[derive(Debug, Clone, Default)]
pub struct DepartmentDetail {
    pub department: Option<Department>,
    pub error: Option<String>,
    pub loading: bool,
}

impl DepartmentDetail {
    pub async fn load(&mut self, api: &ApiClient, department_id: &str) -> Option<Notice> {
        if department_id.trim().is_empty() {
            self.error = Some("Department ID is required.".to_string());
            self.loading = false;
            return None;
        }

        self.loading = true;
        let result = api.get_department(department_id).await;
        self.loading = false;

        match result {
            Ok(department) => {
                self.department = Some(department);
                self.error = None;
                None
            }
            Err(e) => {
                let notice = Notice::failure("Failed to load department members", &e);
                self.error = Some(notice.message.clone());
                Some(notice)
            }
        }
    }

    pub fn members(&self) -> &[User] {
        self.department
            .as_ref()
            .map(Department::members)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use crate::pages::fixtures;
    use louvor_shared::protocol::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_loads_members() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(
            HttpMethod::Get,
            &url("/departments/1"),
            200,
            fixtures::department("1", "Worship", vec![fixtures::user("u1", "Ana Lima")]),
        );

        let mut page = DepartmentDetail::default();
        assert_eq!(page.load(&api, "1").await, None);
        assert_eq!(page.members().len(), 1);
        assert_eq!(page.members()[0].initials(), "AL");
    }

    #[tokio::test]
    async fn test_missing_users_field_means_no_members() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(
            HttpMethod::Get,
            &url("/departments/1"),
            200,
            json!({"id": 1, "name": "Worship"}),
        );

        let mut page = DepartmentDetail::default();
        page.load(&api, "1").await;
        assert!(page.members().is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_sets_error() {
        let (api, _, _) = mock_api(&[]);
        let mut page = DepartmentDetail::default();

        let notice = page.load(&api, "404").await.unwrap();
        assert!(notice.is_error());
        assert_eq!(page.error.as_deref(), Some("Failed to load department members"));
    }
}
