use std::fmt::Write;

use feed_client::Post;

const DESCRIPTION_LIMIT: usize = 160;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageMetadata {
    pub(crate) title: String,
    pub(crate) description: String,
}

/// Метаданные страницы поста; `None` — пост не найден или id некорректен.
pub(crate) fn post_metadata(post: Option<&Post>) -> PageMetadata {
    match post {
        Some(post) => {
            let mut description: String = post.body.chars().take(DESCRIPTION_LIMIT).collect();
            description.push_str("...");
            PageMetadata {
                title: format!("{} | Blog", post.title),
                description,
            }
        }
        None => PageMetadata {
            title: "Post Not Found".to_string(),
            description: "The requested post could not be found.".to_string(),
        },
    }
}

fn badge(post: &Post) -> &'static str {
    if post.is_saved() { " (Your Post)" } else { "" }
}

pub(crate) fn render_post_list(posts: &[Post]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Blog Posts");
    let _ = writeln!(out, "Discover our collection of articles and insights");
    let _ = writeln!(out);

    if posts.is_empty() {
        let _ = writeln!(out, "No posts found.");
        return out;
    }

    for post in posts {
        let _ = writeln!(out, "- [{}] {}{}", post.id, post.title, badge(post));
    }
    out
}

/// Страница поста: заголовок и описание из метаданных, затем сам пост.
pub(crate) fn render_post_detail(post: &Post) -> String {
    let meta = post_metadata(Some(post));
    let mut out = String::new();
    let _ = writeln!(out, "{}", meta.title);
    let _ = writeln!(out, "{}", meta.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}{}", post.title, badge(post));
    let _ = writeln!(out, "id: {}", post.id);
    let _ = writeln!(out, "author_id: {}", post.user_id);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", post.body);
    out
}

pub(crate) fn render_saved_posts(posts: &[Post]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Saved Posts");
    let _ = writeln!(out, "Your personally created posts that you can edit and delete");
    let _ = writeln!(out);

    if posts.is_empty() {
        let _ = writeln!(out, "No saved posts yet");
        let _ = writeln!(out, "Create your first post to see it here!");
        return out;
    }

    for post in posts {
        let _ = writeln!(out, "- [{}] {}", post.id, post.title);
        let _ = writeln!(out, "    {}", preview(&post.body, 80));
    }
    out
}

fn preview(body: &str, limit: usize) -> String {
    let line = body.lines().next().unwrap_or_default();
    if line.chars().count() <= limit {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(limit).collect();
    cut.push('…');
    cut
}
