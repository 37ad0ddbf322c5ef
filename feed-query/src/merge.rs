use std::cmp::Ordering;
use std::collections::HashSet;

use feed_client::Post;

/// Порядок ленты: сначала локальные посты (более новые, т.е. более отрицательные,
/// первыми), затем удалённые по возрастанию id.
pub fn compare_post_ids(a: i64, b: i64) -> Ordering {
    match (a < 0, b < 0) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(&b),
    }
}

/// Сводит сохранённые и удалённые посты в одну ленту.
///
/// При совпадении id побеждает первое вхождение, то есть сохранённый пост.
pub fn merge_posts(saved: Vec<Post>, remote: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::with_capacity(saved.len() + remote.len());
    let mut merged: Vec<Post> = saved
        .into_iter()
        .chain(remote)
        .filter(|post| seen.insert(post.id))
        .collect();

    merged.sort_by(|a, b| compare_post_ids(a.id, b.id));
    merged
}
