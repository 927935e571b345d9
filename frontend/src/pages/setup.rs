use louvor_shared::Role;

use crate::auth::{Session, SessionManager};
use crate::error::ErrorKind;
use crate::notify::Notice;

/// 首次设置：选择角色并填写部门邀请码
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupForm {
    pub role: Role,
    pub code: String,
}

impl SetupForm {
    /// 成功时返回已完成设置的新会话
    pub async fn submit(
        &self,
        manager: &SessionManager,
        session: &Session,
    ) -> (Option<Session>, Notice) {
        match manager.submit_setup(session, self.role, &self.code).await {
            Ok(session) => (Some(session), Notice::success("Setup concluído com sucesso!")),
            Err(e) if e.kind == ErrorKind::InvalidInput && e.status.is_none() => (
                None,
                Notice::failure("Erro interno: ID de usuário não encontrado.", &e),
            ),
            Err(e) => (
                None,
                Notice::failure(
                    "Erro ao completar o setup. Verifique os dados e tente novamente.",
                    &e,
                ),
            ),
        }
    }
}
