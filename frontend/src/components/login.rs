use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::notify::{Notice, use_notifier};
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 登录页
///
/// 登录成功后会话信号变化，路由守卫会把用户带到面板或设置页。
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let is_submitting = move || auth.state.get().is_loading;

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        if email.trim().is_empty() || password.is_empty() {
            notifier.notify(Notice::error("Preencha o e-mail e a senha."));
            return;
        }

        spawn_local(async move {
            if let Err(e) = auth.login(email, password).await {
                notifier.notify(Notice::failure(
                    "Erro ao logar. Verifique os dados e tente novamente.",
                    &e,
                ));
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"IISC Worship"</h1>
                    <p class="text-base-content/70">"Que bom ver você de novo!"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="Insira o seu email..."
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Senha"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="Insira sua senha..."
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Entrando..." }.into_any()
                                } else {
                                    "Entrar".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm text-base-content/70">
                            "Não tem uma conta? "
                            <Link route=AppRoute::Register class="link link-primary">"Cadastre-se"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
