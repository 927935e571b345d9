use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use louvor_shared::SongVersion;

use super::{Layout, Loading, PageOps, confirm};
use crate::pages::song_versions::{SongVersionList, VersionDraft};
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn SongVersionsPage(song_id: String, version_id: Option<String>) -> impl IntoView {
    let ops = PageOps::new(SongVersionList {
        loading: true,
        ..SongVersionList::new(song_id)
    });
    ops.run(move |mut page, api| async move {
        let notice = page.load(&api, version_id.as_deref()).await;
        (page, notice)
    });

    let draft = RwSignal::new(VersionDraft::default());
    let editing = RwSignal::new(None::<String>);

    let reset = move || {
        draft.set(VersionDraft::default());
        editing.set(None);
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        let target = editing.get_untracked();
        reset();

        ops.run(move |mut page, api| async move {
            let notice = match target {
                Some(id) => page.update(&api, &id, &current).await,
                None => page.create(&api, &current).await,
            };
            (page, Some(notice))
        });
    };

    let start_edit = move |version: SongVersion| {
        draft.set(VersionDraft::from_version(&version));
        editing.set(Some(version.id));
    };

    let on_show = move |version_id: String| {
        ops.run(move |mut page, api| async move {
            let notice = page.show_detail(&api, &version_id).await;
            (page, notice)
        });
    };

    let on_delete = move |version: SongVersion| {
        if !confirm(&format!("Excluir a versão \"{}\"?", version.version_name)) {
            return;
        }
        ops.run(move |mut page, api| async move {
            let notice = page.delete(&api, &version.id).await;
            (page, Some(notice))
        });
    };

    view! {
        <Layout>
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Versões da música"</h1>
                <Link route=AppRoute::Songs class="btn btn-ghost btn-sm">"Voltar ao repertório"</Link>
            </div>

            <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                <div class="card-body gap-4">
                    <h2 class="card-title">
                        {move || if editing.get().is_some() { "Editar versão" } else { "Nova versão" }}
                    </h2>
                    <div class="grid gap-4 md:grid-cols-3">
                        <DraftInput
                            draft=draft
                            placeholder="Nome da versão"
                            get=|d| d.version_name.clone()
                            set=|d, v| d.version_name = v
                        />
                        <DraftInput
                            draft=draft
                            placeholder="Classificação"
                            get=|d| d.classification.clone()
                            set=|d, v| d.classification = v
                        />
                        <DraftInput draft=draft placeholder="Tom" get=|d| d.key.clone() set=|d, v| d.key = v />
                    </div>
                    <div class="grid gap-4 md:grid-cols-2">
                        <DraftInput
                            draft=draft
                            placeholder="Link da cifra"
                            get=|d| d.link_chord.clone()
                            set=|d, v| d.link_chord = v
                        />
                        <DraftInput
                            draft=draft
                            placeholder="Link do vídeo"
                            get=|d| d.link_video.clone()
                            set=|d, v| d.link_video = v
                        />
                    </div>
                    <div class="card-actions justify-end">
                        <Show when=move || editing.get().is_some()>
                            <button type="button" class="btn btn-ghost" on:click=move |_| reset()>
                                "Cancelar"
                            </button>
                        </Show>
                        <button type="submit" class="btn btn-primary">
                            {move || if editing.get().is_some() { "Salvar" } else { "Criar versão" }}
                        </button>
                    </div>
                </div>
            </form>

            {move || {
                ops.state.get().selected.map(|version| view! {
                    <VersionDetail
                        version=version
                        on_close=move || ops.run(|mut page, _| async move {
                            page.close_detail();
                            (page, None)
                        })
                    />
                })
            }}

            <Show when=move || !ops.state.with(|p| p.loading) fallback=|| view! { <Loading /> }>
                <div class="grid gap-4 md:grid-cols-2">
                    {move || {
                        ops.state
                            .get()
                            .versions
                            .into_iter()
                            .map(|version| {
                                let id = version.id.clone();
                                let for_edit = version.clone();
                                let for_delete = version.clone();
                                view! {
                                    <div class="card bg-base-100 shadow-md">
                                        <div class="card-body">
                                            <h2 class="card-title">{version.version_name}</h2>
                                            <div class="flex gap-2">
                                                <span class="badge badge-primary">{version.key}</span>
                                                <span class="badge badge-ghost">{version.classification}</span>
                                            </div>
                                            <div class="card-actions justify-end">
                                                <button
                                                    class="btn btn-sm btn-ghost"
                                                    on:click=move |_| on_show(id.clone())
                                                >
                                                    "Detalhes"
                                                </button>
                                                <button
                                                    class="btn btn-sm btn-outline"
                                                    on:click=move |_| start_edit(for_edit.clone())
                                                >
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
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </Layout>
    }
}

#[component]
fn DraftInput(
    draft: RwSignal<VersionDraft>,
    placeholder: &'static str,
    get: fn(&VersionDraft) -> String,
    set: fn(&mut VersionDraft, String),
) -> impl IntoView {
    view! {
        <input
            type="text"
            class="input input-bordered"
            placeholder=placeholder
            prop:value=move || draft.with(get)
            on:input=move |ev| {
                let value = event_target_value(&ev);
                draft.update(|d| set(d, value));
            }
        />
    }
}

#[component]
fn VersionDetail(version: SongVersion, on_close: impl Fn() + 'static) -> impl IntoView {
    let link = |label: &'static str, href: Option<String>| {
        href.map(|href| view! {
            <a class="link link-primary" href=href target="_blank" rel="noopener">{label}</a>
        })
    };

    view! {
        <div class="card bg-base-100 shadow-xl border border-primary">
            <div class="card-body">
                <h2 class="card-title">{version.version_name}</h2>
                <p>"Classificação: " {version.classification}</p>
                <p>"Tom: " {version.key}</p>
                <div class="flex gap-4">
                    {link("Cifra", version.link_chord)}
                    {link("Vídeo", version.link_video)}
                </div>
                <div class="card-actions justify-end">
                    <button class="btn btn-sm" on:click=move |_| on_close()>"Fechar"</button>
                </div>
            </div>
        </div>
    }
}
