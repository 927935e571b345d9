use louvor_shared::Schedule;

use crate::api::ApiClient;
use crate::notify::Notice;

/// 日程详情：歌曲和参与者
#[derive(Debug, Clone, Default)]
pub struct ScheduleDetail {
    pub schedule: Option<Schedule>,
    pub error: Option<String>,
}

impl ScheduleDetail {
    pub async fn load(
        &mut self,
        api: &ApiClient,
        department_id: &str,
        schedule_id: &str,
    ) -> Option<Notice> {
        match api.get_schedule(department_id, schedule_id).await {
            Ok(schedule) => {
                self.schedule = Some(schedule);
                self.error = None;
                None
            }
            Err(e) => {
                let notice = Notice::failure(e.message.clone(), &e);
                self.error = Some(notice.message.clone());
                Some(notice)
            }
        }
    }
}
