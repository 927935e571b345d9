use louvor_shared::{Department, DepartmentForm, User, non_blank};

use super::{find_by_key, remove_by_key, replace_by_key};
use crate::api::ApiClient;
use crate::notify::Notice;

/// 部门列表页
#[derive(Debug, Clone, Default)]
pub struct DepartmentList {
    pub departments: Vec<Department>,
    /// 添加成员时可选择的所有用户
    pub users: Vec<User>,
    pub loading: bool,
}

impl DepartmentList {
    pub async fn load(&mut self, api: &ApiClient) -> Option<Notice> {
        self.loading = true;
        let result = api.get_departments().await;
        self.loading = false;

        match result {
            Ok(departments) => {
                self.departments = departments;
                None
            }
            Err(e) => Some(Notice::failure(
                "Erro ao carregar departamentos. Tente novamente.",
                &e,
            )),
        }
    }

    pub async fn load_users(&mut self, api: &ApiClient) -> Option<Notice> {
        match api.get_users().await {
            Ok(users) => {
                self.users = users;
                None
            }
            Err(e) => Some(Notice::failure("Erro ao buscar usuários.", &e)),
        }
    }

    pub async fn create(&mut self, api: &ApiClient, name: &str, description: &str) -> Notice {
        let Some(form) = Self::form(name, description) else {
            return Notice::error("O nome do departamento é obrigatório.");
        };

        match api.create_department(form).await {
            Ok(department) => {
                self.departments.push(department);
                Notice::success("Departamento criado com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao criar departamento. Tente novamente.", &e),
        }
    }

    /// 只更新名称和描述，保留本地已有的成员列表
    pub async fn update(
        &mut self,
        api: &ApiClient,
        department_id: &str,
        name: &str,
        description: &str,
    ) -> Notice {
        let Some(form) = Self::form(name, description) else {
            return Notice::error("O nome do departamento é obrigatório.");
        };

        match api.update_department(department_id, form).await {
            Ok(updated) => {
                if let Some(existing) = find_by_key(&self.departments, department_id) {
                    let merged = Department {
                        name: updated.name,
                        description: updated.description,
                        ..existing.clone()
                    };
                    replace_by_key(&mut self.departments, merged);
                }
                Notice::success("Departamento atualizado com sucesso!")
            }
            Err(e) => Notice::failure(
                "Erro ao atualizar o departamento. Verifique os dados e tente novamente.",
                &e,
            ),
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, department_id: &str) -> Notice {
        match api.delete_department(department_id).await {
            Ok(()) => {
                remove_by_key(&mut self.departments, department_id);
                Notice::success("Departamento excluído com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao excluir departamento. Tente novamente.", &e),
        }
    }

    /// 是否已是该部门成员（部门的成员列表或用户自身的 departmentId）
    pub fn is_member(&self, department_id: &str, user_id: &str) -> bool {
        let in_list = find_by_key(&self.departments, department_id)
            .is_some_and(|d| d.has_member(user_id));
        let by_user = find_by_key(&self.users, user_id).is_some_and(|u| u.belongs_to(department_id));
        in_list || by_user
    }

    /// 添加成员，成功后重新加载部门以刷新成员数
    pub async fn add_member(&mut self, api: &ApiClient, department_id: &str, user_id: &str) -> Notice {
        if self.is_member(department_id, user_id) {
            return Notice::error("Este membro já está no departamento.");
        }

        match api.add_department_member(department_id, user_id).await {
            Ok(()) => {
                if let Some(notice) = self.load(api).await {
                    return notice;
                }
                Notice::success("Membro adicionado com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao adicionar membro. Tente novamente.", &e),
        }
    }

    fn form(name: &str, description: &str) -> Option<DepartmentForm> {
        Some(DepartmentForm {
            name: non_blank(name)?,
            description: non_blank(description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use crate::pages::fixtures;
    use louvor_shared::protocol::HttpMethod;
    use serde_json::json;

    async fn loaded(http: &crate::web::MockHttpClient, api: &ApiClient) -> DepartmentList {
        http.mock_response(
            HttpMethod::Get,
            &url("/departments"),
            200,
            json!([
                fixtures::department(
                    "1",
                    "Worship",
                    vec![fixtures::user("u1", "Ana"), fixtures::user("u2", "Bruno")]
                ),
                fixtures::department("2", "Mídia", vec![]),
                fixtures::department("3", "Infantil", vec![]),
            ]),
        );
        let mut page = DepartmentList::default();
        assert_eq!(page.load(api).await, None);
        page
    }

    #[tokio::test]
    async fn test_member_count_label() {
        let (api, http, _) = mock_api(&[]);
        let page = loaded(&http, &api).await;
        assert_eq!(page.departments[0].member_label(), "2 membros");
        assert_eq!(page.departments[1].member_label(), "0 membros");
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_that_id() {
        let (api, http, _) = mock_api(&[]);
        let mut page = loaded(&http, &api).await;
        http.mock_response(HttpMethod::Delete, &url("/departments/2"), 204, json!(null));

        let notice = page.delete(&api, "2").await;
        assert!(!notice.is_error());
        let ids: Vec<&str> = page.departments.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[tokio::test]
    async fn test_delete_ignores_confirmation_body() {
        let (api, http, _) = mock_api(&[]);
        let mut page = loaded(&http, &api).await;
        http.mock_response(
            HttpMethod::Delete,
            &url("/departments/2"),
            200,
            json!({"message": "Department deleted successfully"}),
        );

        let notice = page.delete(&api, "2").await;
        assert_eq!(notice.message, "Departamento excluído com sucesso!");
        let ids: Vec<&str> = page.departments.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let (api, http, _) = mock_api(&[]);
        let mut page = loaded(&http, &api).await;
        http.mock_response(HttpMethod::Delete, &url("/departments/2"), 500, json!("boom"));

        let notice = page.delete(&api, "2").await;
        assert_eq!(notice.message, "Erro ao excluir departamento. Tente novamente.");
        assert_eq!(page.departments.len(), 3);
    }

    #[tokio::test]
    async fn test_create_requires_name_and_omits_empty_description() {
        let (api, http, _) = mock_api(&[]);
        let mut page = DepartmentList::default();

        let notice = page.create(&api, "   ", "x").await;
        assert!(notice.is_error());
        assert!(http.requests().is_empty());

        http.mock_response(
            HttpMethod::Post,
            &url("/departments"),
            201,
            fixtures::department("9", "Louvor", vec![]),
        );
        let notice = page.create(&api, " Louvor ", "").await;
        assert_eq!(notice.message, "Departamento criado com sucesso!");
        assert_eq!(http.last_request().json_body(), json!({"name": "Louvor"}));
        assert_eq!(page.departments.len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_members() {
        let (api, http, _) = mock_api(&[]);
        let mut page = loaded(&http, &api).await;
        http.mock_response(
            HttpMethod::Put,
            &url("/departments/1"),
            200,
            json!({"id": "1", "name": "Louvor", "description": "Domingo"}),
        );

        let notice = page.update(&api, "1", "Louvor", "Domingo").await;
        assert!(!notice.is_error());
        let dept = &page.departments[0];
        assert_eq!(dept.name, "Louvor");
        assert_eq!(dept.description.as_deref(), Some("Domingo"));
        assert_eq!(dept.member_count(), 2);
    }

    #[tokio::test]
    async fn test_add_member_rejects_duplicates() {
        let (api, http, _) = mock_api(&[]);
        let mut page = loaded(&http, &api).await;
        let sent = http.requests().len();

        let notice = page.add_member(&api, "1", "u1").await;
        assert_eq!(notice.message, "Este membro já está no departamento.");
        assert_eq!(http.requests().len(), sent);
    }

    #[tokio::test]
    async fn test_add_member_checks_user_department() {
        let (api, http, _) = mock_api(&[]);
        let mut page = loaded(&http, &api).await;
        http.mock_response(
            HttpMethod::Get,
            &url("/users"),
            200,
            json!([{"id": "u5", "name": "Caio", "departmentId": 2}]),
        );
        assert_eq!(page.load_users(&api).await, None);

        assert!(page.is_member("2", "u5"));
        let notice = page.add_member(&api, "2", "u5").await;
        assert!(notice.is_error());
    }

    #[tokio::test]
    async fn test_add_member_reloads_departments() {
        let (api, http, _) = mock_api(&[]);
        let mut page = loaded(&http, &api).await;
        http.mock_response(
            HttpMethod::Post,
            &url("/departments/2/users/u1"),
            200,
            json!({}),
        );

        let notice = page.add_member(&api, "2", "u1").await;
        assert_eq!(notice.message, "Membro adicionado com sucesso!");
        let last = http.last_request();
        assert_eq!(last.method, HttpMethod::Get);
        assert_eq!(last.url, url("/departments"));
    }
}
