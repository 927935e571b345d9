//! 临时提示消息
//!
//! 页面控制器的每个操作都返回一个 `Notice`，由 `Notifier` 显示一段时间后自动清除。

use std::time::Duration;

use leptos::prelude::*;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// 记录底层错误，并向用户显示固定的提示
    pub fn failure(message: impl Into<String>, err: &ApiError) -> Self {
        let message = message.into();
        tracing::warn!(code = err.error_code(), detail = %err.message, "{}", message);
        Self::error(message)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// 提示消息服务，通过 Context 共享
#[derive(Clone, Copy)]
pub struct Notifier {
    current: RwSignal<Option<Notice>>,
    /// 每条新消息递增，过期的定时器不会清除更新的消息
    generation: StoredValue<u64>,
    timeout: Duration,
}

impl Notifier {
    pub fn new(timeout: Duration) -> Self {
        Self {
            current: RwSignal::new(None),
            generation: StoredValue::new(0),
            timeout,
        }
    }

    pub fn current(&self) -> Signal<Option<Notice>> {
        self.current.into()
    }

    pub fn notify(&self, notice: Notice) {
        self.generation.update_value(|g| *g += 1);
        let shown = self.generation.get_value();
        self.current.set(Some(notice));

        let current = self.current;
        let generation = self.generation;
        set_timeout(
            move || {
                if generation.get_value() == shown {
                    current.set(None);
                }
            },
            self.timeout,
        );
    }

    /// 仅在有消息时提示（加载操作成功时不打扰用户）
    pub fn notify_opt(&self, notice: Option<Notice>) {
        if let Some(notice) = notice {
            self.notify(notice);
        }
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

/// 提示框出口，放在应用根部
#[component]
pub fn NoticeOutlet() -> impl IntoView {
    let notifier = use_notifier();
    let current = notifier.current();

    view! {
        {move || {
            current
                .get()
                .map(|notice| {
                    let class = if notice.is_error() {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    };
                    view! {
                        <div class="toast toast-top toast-end z-50">
                            <div class=class on:click=move |_| notifier.dismiss()>
                                <span>{notice.message}</span>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
