use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::notify::{Notice, use_notifier};
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let is_submitting = move || auth.state.get().is_loading;

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let name = name.get_untracked();
        let email = email.get_untracked();
        let password = password.get_untracked();
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            notifier.notify(Notice::error("Preencha todos os campos."));
            return;
        }

        spawn_local(async move {
            match auth.register(name, email, password).await {
                Ok(()) => notifier.notify(Notice::success("Cadastro realizado com sucesso!")),
                Err(e) => notifier.notify(Notice::failure(
                    "Erro ao cadastrar. Verifique os dados e tente novamente.",
                    &e,
                )),
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"IISC Worship"</h1>
                    <p class="text-base-content/70">"Que bom ver você aqui!"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Nome"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                placeholder="Insira seu nome..."
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                class="input input-bordered"
                                required
                            />
                        </div>
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
                            <div class="join w-full">
                                <input
                                    id="password"
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    placeholder="Insira sua senha..."
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    class="input input-bordered join-item w-full"
                                    required
                                />
                                <button
                                    type="button"
                                    class="btn join-item"
                                    on:click=move |_| set_show_password.update(|v| *v = !*v)
                                >
                                    {move || if show_password.get() { "Ocultar" } else { "Mostrar" }}
                                </button>
                            </div>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                "Criar conta"
                            </button>
                        </div>
                        <p class="text-center text-sm text-base-content/70">
                            "Já tem uma conta? "
                            <Link route=AppRoute::Login class="link link-primary">"Entrar"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
