//! UI 组件层
//!
//! 组件只负责渲染页面控制器 (`crate::pages`) 的状态并把用户操作转交给控制器。

pub mod dashboard;
pub mod department_detail;
pub mod departments;
pub mod login;
pub mod profile;
pub mod register;
pub mod schedule_detail;
pub mod schedules;
pub mod setup;
pub mod song_versions;
pub mod songs;

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiClient, use_api};
use crate::auth::use_auth;
use crate::notify::{Notice, Notifier, use_notifier};
use crate::web::route::AppRoute;
use crate::web::router::Link;

type JobFuture<S> = Pin<Box<dyn Future<Output = (S, Option<Notice>)>>>;

/// 一个排队中的控制器操作
pub(crate) type Job<S> = Box<dyn FnOnce(S, ApiClient) -> JobFuture<S> + Send + Sync>;

pub(crate) fn job<S, F, Fut>(op: F) -> Job<S>
where
    S: 'static,
    F: FnOnce(S, ApiClient) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (S, Option<Notice>)> + 'static,
{
    Box::new(move |state: S, api: ApiClient| {
        let fut: JobFuture<S> = Box::pin(op(state, api));
        fut
    })
}

/// 页面操作队列
///
/// 同一页面的操作严格依次执行：每个操作拿到的是上一个操作写回后的状态。
pub(crate) struct JobQueue<S> {
    jobs: VecDeque<Job<S>>,
    running: bool,
}

impl<S> Default for JobQueue<S> {
    fn default() -> Self {
        Self {
            jobs: VecDeque::new(),
            running: false,
        }
    }
}

impl<S> JobQueue<S> {
    /// 入队；返回 true 表示调用方需要启动消费
    pub fn push(&mut self, job: Job<S>) -> bool {
        self.jobs.push_back(job);
        !std::mem::replace(&mut self.running, true)
    }

    /// 取出下一个操作，队列为空时结束本轮消费
    pub fn pop(&mut self) -> Option<Job<S>> {
        let job = self.jobs.pop_front();
        if job.is_none() {
            self.running = false;
        }
        job
    }
}

/// 页面状态与其依赖的服务
///
/// 全部字段都是 arena 句柄，因此可以 `Copy` 进任意事件闭包。
pub(crate) struct PageOps<S: Send + Sync + 'static> {
    pub state: RwSignal<S>,
    api: StoredValue<ApiClient>,
    notifier: Notifier,
    queue: StoredValue<JobQueue<S>>,
}

impl<S: Send + Sync + 'static> Clone for PageOps<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Send + Sync + 'static> Copy for PageOps<S> {}

impl<S: Clone + Send + Sync + 'static> PageOps<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: RwSignal::new(initial),
            api: StoredValue::new(use_api()),
            notifier: use_notifier(),
            queue: StoredValue::new(JobQueue::default()),
        }
    }

    /// 在后台执行一个控制器操作
    ///
    /// 操作排队执行，开始时取当前状态的副本，完成后整体写回并显示提示。
    /// 状态的所有修改都必须经过这里，否则会被进行中的操作覆盖。
    pub fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce(S, ApiClient) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = (S, Option<Notice>)> + 'static,
    {
        let job = job(op);
        let mut start = false;
        self.queue.update_value(|q| start = q.push(job));
        if start {
            let this = *self;
            spawn_local(async move { this.drain().await });
        }
    }

    async fn drain(self) {
        loop {
            let mut next = None;
            self.queue.update_value(|q| next = q.pop());
            let Some(job) = next else { break };

            let current = self.state.get_untracked();
            let (state, notice) = job(current, self.api.get_value()).await;
            self.state.set(state);
            self.notifier.notify_opt(notice);
        }
    }
}

/// 浏览器确认框，无法弹出时视为取消
pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 头像：有图片时显示图片，否则显示姓名首字母
#[component]
pub fn Avatar(name: String, #[prop(optional_no_strip)] url: Option<String>) -> impl IntoView {
    match url {
        Some(url) => view! {
            <div class="avatar">
                <div class="w-10 rounded-full">
                    <img src=url alt=name />
                </div>
            </div>
        }
        .into_any(),
        None => view! {
            <div class="avatar placeholder">
                <div class="bg-primary text-primary-content w-10 rounded-full">
                    <span>{louvor_shared::initials(&name)}</span>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex justify-center py-8">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 已登录页面的通用外框：导航栏 + 内容
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let profile = auth
        .session()
        .user_id
        .map(|user_id| AppRoute::Profile { user_id });

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow-xl">
                <div class="flex-1 gap-2">
                    <Link route=AppRoute::Dashboard class="btn btn-ghost text-xl">"IISC Worship"</Link>
                    <Link route=AppRoute::Departments class="btn btn-ghost btn-sm">"Departamentos"</Link>
                    <Link route=AppRoute::Songs class="btn btn-ghost btn-sm">"Repertório"</Link>
                </div>
                <div class="flex-none gap-2">
                    {profile.map(|route| view! {
                        <Link route=route class="btn btn-ghost btn-sm">"Meu perfil"</Link>
                    })}
                    <button class="btn btn-outline btn-error btn-sm" on:click=move |_| auth.logout()>
                        "Sair"
                    </button>
                </div>
            </div>
            <main class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">{children()}</main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use crate::pages::departments::DepartmentList;
    use crate::pages::fixtures;
    use louvor_shared::protocol::HttpMethod;
    use serde_json::json;

    async fn drain(
        queue: &mut JobQueue<DepartmentList>,
        mut state: DepartmentList,
        api: &ApiClient,
    ) -> DepartmentList {
        while let Some(job) = queue.pop() {
            state = job(state, api.clone()).await.0;
        }
        state
    }

    #[test]
    fn test_queue_starts_consumer_once() {
        let mut queue = JobQueue::<DepartmentList>::default();
        let noop = || job(|page: DepartmentList, _| async move { (page, None) });

        assert!(queue.push(noop()));
        assert!(!queue.push(noop()));
        assert!(queue.pop().is_some());
        assert!(queue.pop().is_some());
        assert!(queue.pop().is_none());
        // 消费结束后再入队需要重新启动
        assert!(queue.push(noop()));
    }

    #[tokio::test]
    async fn test_create_queued_behind_load_keeps_loaded_items() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(
            HttpMethod::Get,
            &url("/departments"),
            200,
            json!([
                fixtures::department("1", "Worship", vec![]),
                fixtures::department("2", "Mídia", vec![]),
            ]),
        );
        http.mock_response(
            HttpMethod::Post,
            &url("/departments"),
            201,
            fixtures::department("9", "Louvor", vec![]),
        );

        let mut queue = JobQueue::default();
        queue.push(job(|mut page: DepartmentList, api| async move {
            let notice = page.load(&api).await;
            (page, notice)
        }));
        queue.push(job(|mut page: DepartmentList, api| async move {
            let notice = page.create(&api, "Louvor", "").await;
            (page, Some(notice))
        }));

        let initial = DepartmentList {
            loading: true,
            ..DepartmentList::default()
        };
        let page = drain(&mut queue, initial, &api).await;
        let ids: Vec<&str> = page.departments.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "9"]);
        assert!(!page.loading);
    }

    #[tokio::test]
    async fn test_deletes_of_different_items_both_apply() {
        let (api, http, _) = mock_api(&[]);
        http.mock_response(
            HttpMethod::Get,
            &url("/departments"),
            200,
            json!([
                fixtures::department("1", "Worship", vec![]),
                fixtures::department("2", "Mídia", vec![]),
                fixtures::department("3", "Infantil", vec![]),
            ]),
        );
        http.mock_response(HttpMethod::Delete, &url("/departments/1"), 204, json!(null));
        http.mock_response(HttpMethod::Delete, &url("/departments/3"), 204, json!(null));

        let mut queue = JobQueue::default();
        queue.push(job(|mut page: DepartmentList, api| async move {
            let notice = page.load(&api).await;
            (page, notice)
        }));
        for id in ["1", "3"] {
            queue.push(job(move |mut page: DepartmentList, api| async move {
                let notice = page.delete(&api, id).await;
                (page, Some(notice))
            }));
        }

        let page = drain(&mut queue, DepartmentList::default(), &api).await;
        let ids: Vec<&str> = page.departments.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["2"]);
    }

    #[tokio::test]
    async fn test_failed_initial_load_clears_loading() {
        let (api, http, _) = mock_api(&[]);
        http.go_offline();

        let mut queue = JobQueue::default();
        queue.push(job(|mut page: DepartmentList, api| async move {
            let notice = page.load(&api).await;
            (page, notice)
        }));
        let initial = DepartmentList {
            loading: true,
            ..DepartmentList::default()
        };
        let page = drain(&mut queue, initial, &api).await;
        assert!(!page.loading);
        assert!(page.departments.is_empty());
    }
}
