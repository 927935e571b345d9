use leptos::prelude::*;

use super::{Avatar, Layout, Loading, PageOps};
use crate::pages::department_detail::DepartmentDetail;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn DepartmentDetailPage(id: String) -> impl IntoView {
    let ops = PageOps::new(DepartmentDetail {
        loading: true,
        ..DepartmentDetail::default()
    });
    let schedules = AppRoute::Schedules { department_id: id.clone() };

    ops.run(move |mut page, api| async move {
        let notice = page.load(&api, &id).await;
        (page, notice)
    });

    view! {
        <Layout>
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">
                    {move || ops.state.with(|p| {
                        p.department.as_ref().map(|d| d.name.clone()).unwrap_or_else(|| "Departamento".to_string())
                    })}
                </h1>
                <Link route=schedules class="btn btn-primary btn-sm">"Ver escalas"</Link>
            </div>

            {move || {
                let page = ops.state.get();
                if page.loading {
                    return view! { <Loading /> }.into_any();
                }
                if let Some(error) = page.error {
                    return view! {
                        <div role="alert" class="alert alert-error"><span>{error}</span></div>
                    }
                    .into_any();
                }
                if page.members().is_empty() {
                    return view! {
                        <p class="text-base-content/60">"Nenhum membro neste departamento."</p>
                    }
                    .into_any();
                }
                view! {
                    <ul class="menu bg-base-100 rounded-box shadow-md w-full">
                        {page
                            .members()
                            .iter()
                            .cloned()
                            .map(|member| {
                                let profile = AppRoute::Profile { user_id: member.id.clone() };
                                view! {
                                    <li>
                                        <Link route=profile class="flex items-center gap-3">
                                            <Avatar name=member.name.clone() url=member.avatar_url.clone() />
                                            <span>{member.name.clone()}</span>
                                            {member.role.map(|r| view! {
                                                <span class="badge badge-outline badge-sm">{r.label()}</span>
                                            })}
                                        </Link>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                .into_any()
            }}
        </Layout>
    }
}
