use leptos::prelude::*;

use super::{Avatar, Layout, Loading, PageOps};
use crate::pages::profile::Profile;

#[component]
pub fn ProfilePage(user_id: String) -> impl IntoView {
    let ops = PageOps::new(Profile {
        loading: true,
        ..Profile::default()
    });
    ops.run(move |mut page, api| async move {
        let notice = page.load(&api, &user_id).await;
        (page, notice)
    });

    view! {
        <Layout>
            {move || {
                let page = ops.state.get();
                if page.loading {
                    return view! { <Loading /> }.into_any();
                }
                let Some(user) = page.user.clone() else {
                    return view! {
                        <div role="alert" class="alert alert-warning">
                            <span>"Usuário não encontrado"</span>
                        </div>
                    }
                    .into_any();
                };

                view! {
                    <div class="card bg-base-100 shadow-xl max-w-lg mx-auto">
                        <div class="card-body items-center text-center">
                            <Avatar name=user.name.clone() url=user.avatar_url.clone() />
                            <h1 class="card-title text-2xl">{user.name}</h1>
                            {user.email.map(|email| view! { <p class="text-base-content/70">{email}</p> })}
                            <div class="stats stats-vertical md:stats-horizontal shadow mt-4">
                                <div class="stat">
                                    <div class="stat-title">"Papel"</div>
                                    <div class="stat-value text-lg">{page.role_label().to_string()}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Departamento"</div>
                                    <div class="stat-value text-lg">{page.department_name().to_string()}</div>
                                </div>
                            </div>
                        </div>
                    </div>
                }
                .into_any()
            }}
        </Layout>
    }
}
