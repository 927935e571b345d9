use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use louvor_shared::{Department, User};

use super::{Layout, Loading, PageOps, confirm};
use crate::pages::departments::DepartmentList;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 部门列表页：创建、编辑、删除部门并添加成员
#[component]
pub fn DepartmentsPage() -> impl IntoView {
    let ops = PageOps::new(DepartmentList {
        loading: true,
        ..DepartmentList::default()
    });

    ops.run(|mut page, api| async move {
        let notice = page.load(&api).await;
        let users_notice = page.load_users(&api).await;
        (page, notice.or(users_notice))
    });

    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    // 正在编辑的部门 ID，None 表示表单处于创建模式
    let editing = RwSignal::new(None::<String>);

    let reset_form = move || {
        set_name.set(String::new());
        set_description.set(String::new());
        editing.set(None);
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let (name, description) = (name.get_untracked(), description.get_untracked());
        let target = editing.get_untracked();
        reset_form();

        ops.run(move |mut page, api| async move {
            let notice = match target {
                Some(id) => page.update(&api, &id, &name, &description).await,
                None => page.create(&api, &name, &description).await,
            };
            (page, Some(notice))
        });
    };

    let start_edit = move |department: Department| {
        set_name.set(department.name);
        set_description.set(department.description.unwrap_or_default());
        editing.set(Some(department.id));
    };

    let on_delete = move |department: Department| {
        if !confirm(&format!("Excluir o departamento \"{}\"?", department.name)) {
            return;
        }
        ops.run(move |mut page, api| async move {
            let notice = page.delete(&api, &department.id).await;
            (page, Some(notice))
        });
    };

    let on_add_member = move |department_id: String, user_id: String| {
        ops.run(move |mut page, api| async move {
            let notice = page.add_member(&api, &department_id, &user_id).await;
            (page, Some(notice))
        });
    };

    view! {
        <Layout>
            <h1 class="text-3xl font-bold">"Departamentos"</h1>

            <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                <div class="card-body gap-4">
                    <h2 class="card-title">
                        {move || if editing.get().is_some() { "Editar departamento" } else { "Novo departamento" }}
                    </h2>
                    <input
                        type="text"
                        class="input input-bordered w-full"
                        placeholder="Nome do departamento"
                        prop:value=name
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <textarea
                        class="textarea textarea-bordered w-full"
                        placeholder="Descrição (opcional)"
                        prop:value=description
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                    <div class="card-actions justify-end">
                        <Show when=move || editing.get().is_some()>
                            <button type="button" class="btn btn-ghost" on:click=move |_| reset_form()>
                                "Cancelar"
                            </button>
                        </Show>
                        <button type="submit" class="btn btn-primary">
                            {move || if editing.get().is_some() { "Salvar" } else { "Criar" }}
                        </button>
                    </div>
                </div>
            </form>

            <Show when=move || !ops.state.with(|p| p.loading) fallback=|| view! { <Loading /> }>
                <div class="grid gap-4 md:grid-cols-2">
                    {move || {
                        let page = ops.state.get();
                        if page.departments.is_empty() {
                            return view! {
                                <p class="text-base-content/60">"Nenhum departamento cadastrado."</p>
                            }
                            .into_any();
                        }
                        page.departments
                            .iter()
                            .map(|department| {
                                let candidates: Vec<User> = page
                                    .users
                                    .iter()
                                    .filter(|u| !page.is_member(&department.id, &u.id))
                                    .cloned()
                                    .collect();
                                view! {
                                    <DepartmentCard
                                        department=department.clone()
                                        candidates=candidates
                                        on_edit=start_edit
                                        on_delete=on_delete
                                        on_add_member=on_add_member
                                    />
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </div>
            </Show>
        </Layout>
    }
}

#[component]
fn DepartmentCard(
    department: Department,
    candidates: Vec<User>,
    on_edit: impl Fn(Department) + Copy + 'static,
    on_delete: impl Fn(Department) + Copy + 'static,
    on_add_member: impl Fn(String, String) + Copy + 'static,
) -> impl IntoView {
    let (selected, set_selected) = signal(String::new());
    let department_id = department.id.clone();
    let detail = AppRoute::Department { id: department.id.clone() };
    let schedules = AppRoute::Schedules { department_id: department.id.clone() };
    let for_edit = department.clone();
    let for_delete = department.clone();

    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body">
                <h2 class="card-title">{department.name.clone()}</h2>
                {department
                    .description
                    .clone()
                    .map(|d| view! { <p class="text-base-content/70">{d}</p> })}
                <div class="badge badge-ghost">{department.member_label()}</div>

                <div class="join w-full mt-2">
                    <select
                        class="select select-bordered select-sm join-item flex-1"
                        on:change=move |ev| set_selected.set(event_target_value(&ev))
                    >
                        <option value="" selected=move || selected.get().is_empty()>
                            "Adicionar membro..."
                        </option>
                        {candidates
                            .into_iter()
                            .map(|u| view! { <option value=u.id>{u.name}</option> })
                            .collect_view()}
                    </select>
                    <button
                        class="btn btn-sm btn-secondary join-item"
                        disabled=move || selected.get().is_empty()
                        on:click=move |_| {
                            on_add_member(department_id.clone(), selected.get_untracked());
                            set_selected.set(String::new());
                        }
                    >
                        "Adicionar"
                    </button>
                </div>

                <div class="card-actions justify-end mt-2">
                    <Link route=detail class="btn btn-sm btn-ghost">"Membros"</Link>
                    <Link route=schedules class="btn btn-sm btn-ghost">"Escalas"</Link>
                    <button class="btn btn-sm btn-outline" on:click=move |_| on_edit(for_edit.clone())>
                        "Editar"
                    </button>
                    <button
                        class="btn btn-sm btn-outline btn-error"
                        on:click=move |_| on_delete(for_delete.clone())
                    >
                        "Excluir"
                    </button>
                </div>
            </div>
        </div>
    }
}
