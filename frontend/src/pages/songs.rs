use louvor_shared::{SONG_GENRES, Song, SongForm, non_blank};

use super::{remove_by_key, replace_by_key};
use crate::api::ApiClient;
use crate::notify::Notice;

/// 曲库页
#[derive(Debug, Clone, Default)]
pub struct SongList {
    pub songs: Vec<Song>,
    pub loading: bool,
}

impl SongList {
    pub fn genres() -> &'static [&'static str] {
        &SONG_GENRES
    }

    pub async fn load(&mut self, api: &ApiClient) -> Option<Notice> {
        self.loading = true;
        let result = api.get_songs().await;
        self.loading = false;

        match result {
            Ok(songs) => {
                self.songs = songs;
                None
            }
            Err(e) => Some(Notice::failure("Erro ao carregar músicas.", &e)),
        }
    }

    pub async fn add(&mut self, api: &ApiClient, title: &str, artist: &str, genre: &str) -> Notice {
        let Some(form) = Self::form(title, artist, genre) else {
            return Notice::error("Título e artista são obrigatórios.");
        };

        match api.create_song(form).await {
            Ok(song) => {
                self.songs.push(song);
                Notice::success("Música adicionada com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao adicionar música.", &e),
        }
    }

    pub async fn update(
        &mut self,
        api: &ApiClient,
        song_id: &str,
        title: &str,
        artist: &str,
        genre: &str,
    ) -> Notice {
        let Some(form) = Self::form(title, artist, genre) else {
            return Notice::error("Título e artista são obrigatórios.");
        };

        match api.update_song(song_id, form).await {
            Ok(song) => {
                replace_by_key(&mut self.songs, song);
                Notice::success("Música atualizada com sucesso!")
            }
            Err(e) => Notice::failure(
                "Erro ao atualizar a música. Verifique os dados e tente novamente.",
                &e,
            ),
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, song_id: &str) -> Notice {
        match api.delete_song(song_id).await {
            Ok(()) => {
                remove_by_key(&mut self.songs, song_id);
                Notice::success("Música excluída com sucesso!")
            }
            Err(e) => Notice::failure("Erro ao excluir música.", &e),
        }
    }

    fn form(title: &str, artist: &str, genre: &str) -> Option<SongForm> {
        Some(SongForm {
            title: non_blank(title)?,
            artist: non_blank(artist)?,
            genre: non_blank(genre),
        })
    }
}
