use louvor_shared::{Department, User};

use crate::api::ApiClient;
use crate::notify::Notice;

/// 用户资料页
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub user: Option<User>,
    pub department: Option<Department>,
    pub loading: bool,
}

impl Profile {
    /// 先加载用户，有 departmentId 时再加载所属部门
    pub async fn load(&mut self, api: &ApiClient, user_id: &str) -> Option<Notice> {
        self.loading = true;
        let notice = self.fetch(api, user_id).await;
        self.loading = false;
        notice
    }

    async fn fetch(&mut self, api: &ApiClient, user_id: &str) -> Option<Notice> {
        let user = match api.get_user(user_id).await {
            Ok(user) => user,
            Err(e) => {
                self.user = None;
                return Some(Notice::failure("Usuário não encontrado", &e));
            }
        };

        self.department = None;
        if let Some(department_id) = user.department_id.as_deref() {
            match api.get_department(department_id).await {
                Ok(department) => self.department = Some(department),
                Err(e) => {
                    self.user = Some(user);
                    return Some(Notice::failure("Erro ao buscar o departamento do usuário.", &e));
                }
            }
        }
        self.user = Some(user);
        None
    }

    pub fn department_name(&self) -> &str {
        self.department
            .as_ref()
            .map(|d| d.name.as_str())
            .unwrap_or("Não atribuído")
    }

    pub fn role_label(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.role)
            .map(|r| r.label())
            .unwrap_or("Não atribuído")
    }
}
