use chrono::Utc;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use louvor_shared::date::{format_date_br, format_form_date, format_time_br};
use louvor_shared::{ParticipantStatus, Schedule, ScheduleFilter, User};

use super::{Layout, Loading, PageOps, confirm};
use crate::pages::schedules::ScheduleList;
use crate::web::route::AppRoute;
use crate::web::router::Link;

const STATUSES: [ParticipantStatus; 3] = [
    ParticipantStatus::Pending,
    ParticipantStatus::Accepted,
    ParticipantStatus::Rejected,
];

#[derive(Debug, Clone, Default)]
struct ScheduleFields {
    name: String,
    /// `YYYY-MM-DD`
    date: String,
    /// `HH:MM`
    time: String,
}

/// 部门日程页
#[component]
pub fn SchedulesPage(department_id: String) -> impl IntoView {
    let ops = PageOps::new(ScheduleList {
        loading: true,
        ..ScheduleList::new(department_id.clone())
    });
    let members = AppRoute::Department { id: department_id };
    ops.run(|mut page, api| async move {
        let notice = page.load(&api).await;
        (page, notice)
    });

    let fields = RwSignal::new(ScheduleFields::default());
    let editing = RwSignal::new(None::<String>);
    // 过滤只影响显示，不经过操作队列
    let filter = RwSignal::new(ScheduleFilter::default());

    let reset = move || {
        fields.set(ScheduleFields::default());
        editing.set(None);
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let ScheduleFields { name, date, time } = fields.get_untracked();
        let target = editing.get_untracked();
        reset();

        ops.run(move |mut page, api| async move {
            let notice = match target {
                Some(id) => page.update(&api, &id, &name, &date, &time).await,
                None => page.create(&api, &name, &date, &time).await,
            };
            (page, Some(notice))
        });
    };

    let start_edit = move |schedule: Schedule| {
        fields.set(ScheduleFields {
            name: schedule.name,
            date: format_form_date(&schedule.date),
            time: format_time_br(&schedule.date),
        });
        editing.set(Some(schedule.id));
    };

    let on_delete = move |schedule: Schedule| {
        if !confirm(&format!("Excluir a escala \"{}\"?", schedule.name)) {
            return;
        }
        ops.run(move |mut page, api| async move {
            let notice = page.delete(&api, &schedule.id).await;
            (page, Some(notice))
        });
    };

    let on_add_participant = move |schedule_id: String, user_id: String, status: ParticipantStatus| {
        ops.run(move |mut page, api| async move {
            let notice = page
                .add_participant(&api, &schedule_id, &user_id, status)
                .await;
            (page, Some(notice))
        });
    };

    view! {
        <Layout>
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Escalas"</h1>
                <Link route=members class="btn btn-ghost btn-sm">"Membros do departamento"</Link>
            </div>

            <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                <div class="card-body gap-4">
                    <h2 class="card-title">
                        {move || if editing.get().is_some() { "Editar escala" } else { "Nova escala" }}
                    </h2>
                    <div class="grid gap-4 md:grid-cols-3">
                        <input
                            type="text"
                            class="input input-bordered"
                            placeholder="Nome da escala"
                            prop:value=move || fields.get().name
                            on:input=move |ev| fields.update(|f| f.name = event_target_value(&ev))
                        />
                        <input
                            type="date"
                            class="input input-bordered"
                            prop:value=move || fields.get().date
                            on:input=move |ev| fields.update(|f| f.date = event_target_value(&ev))
                        />
                        <input
                            type="time"
                            class="input input-bordered"
                            prop:value=move || fields.get().time
                            on:input=move |ev| fields.update(|f| f.time = event_target_value(&ev))
                        />
                    </div>
                    <div class="card-actions justify-end">
                        <Show when=move || editing.get().is_some()>
                            <button type="button" class="btn btn-ghost" on:click=move |_| reset()>
                                "Cancelar"
                            </button>
                        </Show>
                        <button type="submit" class="btn btn-primary">
                            {move || if editing.get().is_some() { "Salvar" } else { "Criar escala" }}
                        </button>
                    </div>
                </div>
            </form>

            <div role="tablist" class="tabs tabs-boxed w-fit">
                {[ScheduleFilter::All, ScheduleFilter::Upcoming, ScheduleFilter::Past]
                    .into_iter()
                    .map(|tab| view! {
                        <a
                            role="tab"
                            class="tab"
                            class:tab-active=move || filter.get() == tab
                            on:click=move |_| filter.set(tab)
                        >
                            {tab.label()}
                        </a>
                    })
                    .collect_view()}
            </div>

            <Show when=move || !ops.state.with(|p| p.loading) fallback=|| view! { <Loading /> }>
                <div class="space-y-4">
                    {move || {
                        let mut page = ops.state.get();
                        page.set_filter(filter.get());
                        let visible = page.visible(Utc::now());
                        if visible.is_empty() {
                            return view! {
                                <p class="text-base-content/60">"Nenhuma escala encontrada."</p>
                            }
                            .into_any();
                        }
                        visible
                            .into_iter()
                            .map(|schedule| {
                                let candidates: Vec<User> =
                                    page.candidates(&schedule.id).into_iter().cloned().collect();
                                view! {
                                    <ScheduleCard
                                        schedule=schedule.clone()
                                        candidates=candidates
                                        on_edit=start_edit
                                        on_delete=on_delete
                                        on_add_participant=on_add_participant
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
fn ScheduleCard(
    schedule: Schedule,
    candidates: Vec<User>,
    on_edit: impl Fn(Schedule) + Copy + 'static,
    on_delete: impl Fn(Schedule) + Copy + 'static,
    on_add_participant: impl Fn(String, String, ParticipantStatus) + Copy + 'static,
) -> impl IntoView {
    let (selected, set_selected) = signal(String::new());
    let (status, set_status) = signal(ParticipantStatus::default());

    let schedule_id = schedule.id.clone();
    let detail = AppRoute::Schedule {
        department_id: schedule.department_id.clone(),
        schedule_id: schedule.id.clone(),
    };
    let when = format!(
        "{} às {}",
        format_date_br(&schedule.date),
        schedule
            .time
            .clone()
            .unwrap_or_else(|| format_time_br(&schedule.date))
    );
    let for_edit = schedule.clone();
    let for_delete = schedule.clone();

    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body">
                <div class="flex items-start justify-between">
                    <div>
                        <h2 class="card-title">{schedule.name.clone()}</h2>
                        <p class="text-base-content/70">{when}</p>
                    </div>
                    <div class="badge badge-ghost">
                        {format!("{} participantes", schedule.participant_count())}
                    </div>
                </div>

                <div class="join w-full mt-2">
                    <select
                        class="select select-bordered select-sm join-item flex-1"
                        on:change=move |ev| set_selected.set(event_target_value(&ev))
                    >
                        <option value="" selected=move || selected.get().is_empty()>
                            "Adicionar participante..."
                        </option>
                        {candidates
                            .into_iter()
                            .map(|u| view! { <option value=u.id>{u.name}</option> })
                            .collect_view()}
                    </select>
                    <select
                        class="select select-bordered select-sm join-item"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            if let Some(s) = STATUSES.into_iter().find(|s| s.label() == value) {
                                set_status.set(s);
                            }
                        }
                    >
                        {STATUSES
                            .into_iter()
                            .map(|s| view! {
                                <option value=s.label() selected=move || status.get() == s>{s.label()}</option>
                            })
                            .collect_view()}
                    </select>
                    <button
                        class="btn btn-sm btn-secondary join-item"
                        disabled=move || selected.get().is_empty()
                        on:click=move |_| {
                            on_add_participant(
                                schedule_id.clone(),
                                selected.get_untracked(),
                                status.get_untracked(),
                            );
                            set_selected.set(String::new());
                        }
                    >
                        "Adicionar"
                    </button>
                </div>

                <div class="card-actions justify-end mt-2">
                    <Link route=detail class="btn btn-sm btn-ghost">"Detalhes"</Link>
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
