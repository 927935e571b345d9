use chrono::{DateTime, Utc};
use louvor_shared::date::parse_form_datetime;
use louvor_shared::{ParticipantStatus, Schedule, ScheduleFilter, ScheduleForm, User, non_blank};

use super::{find_by_key, remove_by_key, replace_by_key};
use crate::api::ApiClient;
use crate::notify::Notice;

/// 部门日程页
#[derive(Debug, Clone, Default)]
pub struct ScheduleList {
    pub department_id: String,
    pub schedules: Vec<Schedule>,
    /// 部门成员，用于挑选参与者
    pub members: Vec<User>,
    pub filter: ScheduleFilter,
    pub loading: bool,
}

impl ScheduleList {
    pub fn new(department_id: impl Into<String>) -> Self {
        Self {
            department_id: department_id.into(),
            ..Self::default()
        }
    }

    pub async fn load(&mut self, api: &ApiClient) -> Option<Notice> {
        self.loading = true;
        let result = api.get_schedules(&self.department_id).await;
        self.loading = false;

        match result {
            Ok(schedules) => self.schedules = schedules,
            Err(e) => return Some(Notice::failure("Erro ao carregar escalas.", &e)),
        }

        // 成员列表只影响「添加参与者」，加载失败不阻塞页面
        match api.get_department(&self.department_id).await {
            Ok(department) => self.members = department.users.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(department = %self.department_id, error = %e, "members unavailable");
                self.members.clear();
            }
        }
        None
    }

    pub fn set_filter(&mut self, filter: ScheduleFilter) {
        self.filter = filter;
    }

    /// 当前过滤条件下可见的日程
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&Schedule> {
        self.schedules
            .iter()
            .filter(|s| self.filter.matches(s, now))
            .collect()
    }

    fn parse_form(name: &str, date: &str, time: &str) -> Result<ScheduleForm, Notice> {
        let name =
            non_blank(name).ok_or_else(|| Notice::error("O nome da escala não pode estar vazio."))?;
        let date = parse_form_datetime(date, time)
            .ok_or_else(|| Notice::error("Informe uma data válida para a escala."))?;
        Ok(ScheduleForm { name, date })
    }

    pub async fn create(&mut self, api: &ApiClient, name: &str, date: &str, time: &str) -> Notice {
        let form = match Self::parse_form(name, date, time) {
            Ok(form) => form,
            Err(notice) => return notice,
        };

        match api
            .create_schedule(&self.department_id, &form.name, form.date)
            .await
        {
            Ok(schedule) => {
                self.schedules.push(schedule);
                Notice::success("Escala criada com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao criar escala. Tente novamente.", &e),
        }
    }

    pub async fn update(
        &mut self,
        api: &ApiClient,
        schedule_id: &str,
        name: &str,
        date: &str,
        time: &str,
    ) -> Notice {
        let form = match Self::parse_form(name, date, time) {
            Ok(form) => form,
            Err(notice) => return notice,
        };

        match api
            .update_schedule(&self.department_id, schedule_id, form)
            .await
        {
            Ok(schedule) => {
                replace_by_key(&mut self.schedules, schedule);
                Notice::success("Escala atualizada com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao atualizar escala. Tente novamente.", &e),
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, schedule_id: &str) -> Notice {
        match api.delete_schedule(&self.department_id, schedule_id).await {
            Ok(()) => {
                remove_by_key(&mut self.schedules, schedule_id);
                Notice::success("Escala excluída com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao excluir escala. Tente novamente.", &e),
        }
    }

    /// 可加入该日程的成员：部门成员中尚未参与该日程的人
    pub fn candidates(&self, schedule_id: &str) -> Vec<&User> {
        let schedule = find_by_key(&self.schedules, schedule_id);
        self.members
            .iter()
            .filter(|u| !schedule.is_some_and(|s| s.has_participant(&u.id)))
            .collect()
    }

    /// 添加参与者，用响应中的参与者列表替换本地列表
    pub async fn add_participant(
        &mut self,
        api: &ApiClient,
        schedule_id: &str,
        user_id: &str,
        status: ParticipantStatus,
    ) -> Notice {
        let Some(user) = find_by_key(&self.members, user_id).cloned() else {
            return Notice::error("Selecione um membro do departamento.");
        };

        match api
            .add_participant(&self.department_id, schedule_id, &user, status)
            .await
        {
            Ok(updated) => {
                if let Some(schedule) = self.schedules.iter_mut().find(|s| s.id == schedule_id) {
                    schedule.participants = updated.participants;
                }
                Notice::success("Participante adicionado com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao adicionar participante. Tente novamente.", &e),
        }
    }
}
