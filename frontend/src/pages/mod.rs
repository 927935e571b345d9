//! 页面控制器
//!
//! 每个页面的状态是一个普通结构体，异步操作接收 `&ApiClient`，更新本地状态并返回
//! 一个 `Notice`。控制器之间不共享缓存，每个页面独立加载自己的数据。
//! 这一层不依赖 Leptos，可以直接在原生测试中驱动。

pub mod department_detail;
pub mod departments;
pub mod profile;
pub mod schedule_detail;
pub mod schedules;
pub mod setup;
pub mod song_versions;
pub mod songs;

use louvor_shared::{Department, Schedule, Song, SongVersion, User};

/// 带有字符串 id 的实体
pub(crate) trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Keyed for $ty {
                fn key(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

keyed!(Department, Schedule, Song, SongVersion, User);

/// 用新值替换同 id 的元素，不存在时返回 false
pub(crate) fn replace_by_key<T: Keyed>(list: &mut [T], item: T) -> bool {
    match list.iter_mut().find(|existing| existing.key() == item.key()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

/// 删除指定 id 的元素，其余元素保持原顺序
pub(crate) fn remove_by_key<T: Keyed>(list: &mut Vec<T>, key: &str) -> bool {
    let before = list.len();
    list.retain(|item| item.key() != key);
    list.len() != before
}

pub(crate) fn find_by_key<'a, T: Keyed>(list: &'a [T], key: &str) -> Option<&'a T> {
    list.iter().find(|item| item.key() == key)
}
