use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use louvor_shared::Song;

use super::{Layout, Loading, PageOps, confirm};
use crate::pages::songs::SongList;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 歌曲表单字段
#[derive(Debug, Clone, Default)]
struct SongFields {
    title: String,
    artist: String,
    genre: String,
}

/// 曲库页
#[component]
pub fn SongsPage() -> impl IntoView {
    let ops = PageOps::new(SongList {
        loading: true,
        ..SongList::default()
    });
    ops.run(|mut page, api| async move {
        let notice = page.load(&api).await;
        (page, notice)
    });

    let fields = RwSignal::new(SongFields::default());
    let editing = RwSignal::new(None::<String>);

    let reset = move || {
        fields.set(SongFields::default());
        editing.set(None);
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let SongFields { title, artist, genre } = fields.get_untracked();
        let target = editing.get_untracked();
        reset();

        ops.run(move |mut page, api| async move {
            let notice = match target {
                Some(id) => page.update(&api, &id, &title, &artist, &genre).await,
                None => page.add(&api, &title, &artist, &genre).await,
            };
            (page, Some(notice))
        });
    };

    let start_edit = move |song: Song| {
        fields.set(SongFields {
            title: song.title,
            artist: song.artist,
            genre: song.genre.unwrap_or_default(),
        });
        editing.set(Some(song.id));
    };

    let on_delete = move |song: Song| {
        if !confirm(&format!("Excluir a música \"{}\"?", song.title)) {
            return;
        }
        ops.run(move |mut page, api| async move {
            let notice = page.delete(&api, &song.id).await;
            (page, Some(notice))
        });
    };

    view! {
        <Layout>
            <h1 class="text-3xl font-bold">"Repertório"</h1>

            <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                <div class="card-body gap-4">
                    <h2 class="card-title">
                        {move || if editing.get().is_some() { "Editar música" } else { "Nova música" }}
                    </h2>
                    <div class="grid gap-4 md:grid-cols-3">
                        <input
                            type="text"
                            class="input input-bordered"
                            placeholder="Título"
                            prop:value=move || fields.get().title
                            on:input=move |ev| fields.update(|f| f.title = event_target_value(&ev))
                        />
                        <input
                            type="text"
                            class="input input-bordered"
                            placeholder="Artista"
                            prop:value=move || fields.get().artist
                            on:input=move |ev| fields.update(|f| f.artist = event_target_value(&ev))
                        />
                        <select
                            class="select select-bordered"
                            on:change=move |ev| fields.update(|f| f.genre = event_target_value(&ev))
                        >
                            <option value="" selected=move || fields.get().genre.is_empty()>
                                "Gênero"
                            </option>
                            {SongList::genres()
                                .iter()
                                .map(|genre| {
                                    let genre = *genre;
                                    view! {
                                        <option value=genre selected=move || fields.get().genre == genre>
                                            {genre}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="card-actions justify-end">
                        <Show when=move || editing.get().is_some()>
                            <button type="button" class="btn btn-ghost" on:click=move |_| reset()>
                                "Cancelar"
                            </button>
                        </Show>
                        <button type="submit" class="btn btn-primary">
                            {move || if editing.get().is_some() { "Salvar" } else { "Adicionar" }}
                        </button>
                    </div>
                </div>
            </form>

            <Show when=move || !ops.state.with(|p| p.loading) fallback=|| view! { <Loading /> }>
                <div class="overflow-x-auto bg-base-100 rounded-box shadow-md">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Título"</th>
                                <th>"Artista"</th>
                                <th>"Gênero"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                ops.state
                                    .get()
                                    .songs
                                    .into_iter()
                                    .map(|song| {
                                        let versions = AppRoute::SongVersions { song_id: song.id.clone() };
                                        let for_edit = song.clone();
                                        let for_delete = song.clone();
                                        view! {
                                            <tr>
                                                <td class="font-semibold">{song.title}</td>
                                                <td>{song.artist}</td>
                                                <td>{song.genre.unwrap_or_else(|| "-".to_string())}</td>
                                                <td class="flex gap-2 justify-end">
                                                    <Link route=versions class="btn btn-xs btn-ghost">"Versões"</Link>
                                                    <button
                                                        class="btn btn-xs btn-outline"
                                                        on:click=move |_| start_edit(for_edit.clone())
                                                    >
                                                        "Editar"
                                                    </button>
                                                    <button
                                                        class="btn btn-xs btn-outline btn-error"
                                                        on:click=move |_| on_delete(for_delete.clone())
                                                    >
                                                        "Excluir"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </Show>
        </Layout>
    }
}
