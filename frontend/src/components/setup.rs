use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use louvor_shared::Role;

use crate::auth::use_auth;
use crate::notify::use_notifier;
use crate::pages::setup::SetupForm;

/// 首次设置页
#[component]
pub fn SetupPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let form = RwSignal::new(SetupForm::default());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let form = form.get_untracked();
        let manager = auth.manager();
        let session = auth.session();
        set_is_submitting.set(true);

        spawn_local(async move {
            let (session, notice) = form.submit(&manager, &session).await;
            set_is_submitting.set(false);
            notifier.notify(notice);
            // 路由守卫会在会话更新后跳转到面板
            if let Some(session) = session {
                auth.set_session(session);
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body" on:submit=on_submit>
                    <h1 class="card-title text-2xl justify-center">"Configuração do Perfil"</h1>
                    <div class="form-control">
                        <label class="label" for="role">
                            <span class="label-text">"Papel"</span>
                        </label>
                        <select
                            id="role"
                            class="select select-bordered"
                            on:change=move |ev| {
                                if let Some(role) = Role::parse(&event_target_value(&ev)) {
                                    form.update(|f| f.role = role);
                                }
                            }
                        >
                            {Role::ALL
                                .iter()
                                .map(|role| {
                                    let role = *role;
                                    view! {
                                        <option
                                            value=role.as_str()
                                            selected=move || form.get().role == role
                                        >
                                            {role.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-control">
                        <label class="label" for="code">
                            <span class="label-text">"Código do departamento"</span>
                        </label>
                        <input
                            id="code"
                            type="text"
                            class="input input-bordered"
                            prop:value=move || form.get().code
                            on:input=move |ev| form.update(|f| f.code = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                            "Concluir"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
