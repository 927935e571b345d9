use leptos::prelude::*;
use louvor_shared::ParticipantStatus;
use louvor_shared::date::{format_date_br, format_time_br};

use super::{Avatar, Layout, Loading, PageOps};
use crate::pages::schedule_detail::ScheduleDetail;
use crate::web::route::AppRoute;
use crate::web::router::Link;

fn status_badge(status: ParticipantStatus) -> &'static str {
    match status {
        ParticipantStatus::Accepted => "badge badge-success",
        ParticipantStatus::Pending => "badge badge-warning",
        ParticipantStatus::Rejected => "badge badge-error",
    }
}

#[component]
pub fn ScheduleDetailPage(department_id: String, schedule_id: String) -> impl IntoView {
    let ops = PageOps::new(ScheduleDetail::default());
    let back = AppRoute::Schedules { department_id: department_id.clone() };

    ops.run(move |mut page, api| async move {
        let notice = page.load(&api, &department_id, &schedule_id).await;
        (page, notice)
    });

    view! {
        <Layout>
            <Link route=back class="btn btn-ghost btn-sm w-fit">"Voltar às escalas"</Link>

            {move || {
                let page = ops.state.get();
                if let Some(error) = page.error {
                    return view! {
                        <div role="alert" class="alert alert-error"><span>{error}</span></div>
                    }
                    .into_any();
                }
                let Some(schedule) = page.schedule else {
                    return view! { <Loading /> }.into_any();
                };

                let when = format!(
                    "{} às {}",
                    format_date_br(&schedule.date),
                    schedule.time.clone().unwrap_or_else(|| format_time_br(&schedule.date))
                );
                let songs = schedule.songs().to_vec();
                let participants = schedule.participants().to_vec();

                view! {
                    <div>
                        <h1 class="text-3xl font-bold">{schedule.name}</h1>
                        <p class="text-base-content/70">{when}</p>
                    </div>

                    <div class="grid gap-6 md:grid-cols-2">
                        <div class="card bg-base-100 shadow-md">
                            <div class="card-body">
                                <h2 class="card-title">"Músicas"</h2>
                                {if songs.is_empty() {
                                    view! { <p class="text-base-content/60">"Nenhuma música nesta escala."</p> }
                                        .into_any()
                                } else {
                                    view! {
                                        <ul class="list-disc list-inside">
                                            {songs
                                                .into_iter()
                                                .map(|song| view! {
                                                    <li>
                                                        <span class="font-semibold">{song.title}</span>
                                                        " - "
                                                        {song.artist}
                                                    </li>
                                                })
                                                .collect_view()}
                                        </ul>
                                    }
                                    .into_any()
                                }}
                            </div>
                        </div>

                        <div class="card bg-base-100 shadow-md">
                            <div class="card-body">
                                <h2 class="card-title">"Participantes"</h2>
                                {if participants.is_empty() {
                                    view! { <p class="text-base-content/60">"Nenhum participante ainda."</p> }
                                        .into_any()
                                } else {
                                    participants
                                        .into_iter()
                                        .map(|p| view! {
                                            <div class="flex items-center gap-3">
                                                <Avatar name=p.user.name.clone() url=p.user.avatar_url.clone() />
                                                <span class="flex-1">{p.user.name}</span>
                                                <span class=status_badge(p.status)>{p.status.label()}</span>
                                            </div>
                                        })
                                        .collect_view()
                                        .into_any()
                                }}
                            </div>
                        </div>
                    </div>
                }
                .into_any()
            }}
        </Layout>
    }
}
