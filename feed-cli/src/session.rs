use std::io::Write;

use anyhow::{Context, Result};
use feed_client::{CreatePostDto, Post, PostGateway, PostPatch};
use feed_query::{PostId, PostQueries, QueryError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::views::{post_metadata, render_post_detail, render_post_list, render_saved_posts};

const HELP: &str = "\
commands:
  list          all posts (saved posts first)
  show <id>     post detail
  saved         your saved posts
  create        create a post
  edit <id>     edit a post
  delete <id>   delete a saved post
  refresh       drop cached results
  help          this message
  quit          leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionCommand {
    List,
    Show(PostId),
    Saved,
    Create,
    Edit(PostId),
    Delete(PostId),
    Refresh,
    Help,
    Quit,
}

pub(crate) fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Err("empty command".to_string());
    };
    let arg = parts.next();

    let with_id = |ctor: fn(PostId) -> SessionCommand| -> Result<SessionCommand, String> {
        let raw = arg.ok_or_else(|| format!("usage: {name} <id>"))?;
        raw.parse::<PostId>().map(ctor).map_err(|err| err.to_string())
    };

    match name {
        "list" | "ls" => Ok(SessionCommand::List),
        "show" => with_id(SessionCommand::Show),
        "saved" => Ok(SessionCommand::Saved),
        "create" | "new" => Ok(SessionCommand::Create),
        "edit" => with_id(SessionCommand::Edit),
        "delete" | "rm" => with_id(SessionCommand::Delete),
        "refresh" => Ok(SessionCommand::Refresh),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        other => Err(format!("unknown command: {other} (try `help`)")),
    }
}

pub(crate) fn is_confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Ошибка загрузки ленты не роняет экран: показываем пустой список.
pub(crate) async fn list_or_empty<G: PostGateway>(queries: &PostQueries<G>) -> Vec<Post> {
    match queries.list_posts().await {
        Ok(posts) => posts,
        Err(err) => {
            warn!(error = %err, "failed to load posts, showing empty list");
            Vec::new()
        }
    }
}

pub(crate) fn map_query_error(err: &QueryError) -> String {
    match err {
        QueryError::InvalidId(raw) => format!("invalid post id: {raw}"),
        QueryError::NotFound(id) => format!("post {id} not found"),
        QueryError::Fetch(err) if err.is_not_found() => "post not found".to_string(),
        QueryError::Fetch(err) => format!("failed to reach the posts api: {err}"),
        QueryError::Validation(err) => format!("invalid post: {err}"),
    }
}

/// Интерактивная сессия: хранилище сохранённых постов живёт, пока она открыта.
pub(crate) struct Session<'a, G: PostGateway, R, W> {
    queries: &'a PostQueries<G>,
    input: R,
    output: W,
    user_id: i64,
}

impl<'a, G, R, W> Session<'a, G, R, W>
where
    G: PostGateway,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub(crate) fn new(queries: &'a PostQueries<G>, input: R, output: W, user_id: i64) -> Self {
        Self {
            queries,
            input,
            output,
            user_id,
        }
    }

    pub(crate) async fn run(&mut self) -> Result<()> {
        writeln!(self.output, "type `help` for commands")?;
        loop {
            let Some(line) = self.prompt("> ").await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(self.output, "{message}")?;
                    continue;
                }
            };
            if command == SessionCommand::Quit {
                break;
            }

            if let Err(err) = self.dispatch(command).await {
                writeln!(self.output, "error: {}", map_query_error(&err))?;
            }
        }
        Ok(())
    }

    /// Наверх уходят только ошибки запросов; сбой записи в вывод логируется в `out`.
    async fn dispatch(&mut self, command: SessionCommand) -> Result<(), QueryError> {
        match command {
            SessionCommand::List => {
                let posts = list_or_empty(self.queries).await;
                self.out(&render_post_list(&posts));
            }
            SessionCommand::Show(id) => {
                let post = self.queries.get_post_by_id(id).await?;
                self.out(&render_post_detail(&post));
            }
            SessionCommand::Saved => {
                let posts = self.queries.saved_posts();
                self.out(&render_saved_posts(&posts));
            }
            SessionCommand::Create => self.create().await?,
            SessionCommand::Edit(id) => self.edit(id).await?,
            SessionCommand::Delete(id) => self.delete(id).await?,
            SessionCommand::Refresh => {
                self.queries.invalidate_all();
                self.out("cache cleared\n");
            }
            SessionCommand::Help => self.out(&format!("{HELP}\n")),
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    async fn create(&mut self) -> Result<(), QueryError> {
        let title = self.ask("title: ").await;
        let body = self.ask("body: ").await;

        let post = self.queries.create_post(CreatePostDto {
            title,
            body,
            user_id: self.user_id,
        })?;
        self.out(&format!("created post {}\n", post.id));
        Ok(())
    }

    async fn edit(&mut self, id: PostId) -> Result<(), QueryError> {
        let current = self.queries.get_post_by_id(id).await?;

        let title = self.ask(&format!("title [{}]: ", current.title)).await;
        let body = self.ask("body [keep]: ").await;
        let patch = PostPatch {
            title: non_empty(title),
            body: non_empty(body),
        };

        let post = self.queries.update_post(id.value(), patch).await?;
        self.out(&format!("updated post {}\n", post.id));
        Ok(())
    }

    async fn delete(&mut self, id: PostId) -> Result<(), QueryError> {
        let answer = self
            .ask("Are you sure you want to delete this post? [y/N] ")
            .await;
        if !is_confirmed(&answer) {
            self.out("cancelled\n");
            return Ok(());
        }

        self.queries.delete_post(id.value())?;
        self.out(&format!("deleted post {id}\n"));
        Ok(())
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .await
            .context("failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ответ на вопрос; конец ввода и ошибка чтения считаются пустым ответом.
    async fn ask(&mut self, label: &str) -> String {
        match self.prompt(label).await {
            Ok(answer) => answer.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "failed to read answer");
                String::new()
            }
        }
    }

    fn out(&mut self, text: &str) {
        if let Err(err) = self.output.write_all(text.as_bytes()) {
            warn!(error = %err, "failed to write output");
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Сообщение для экрана поста, который не удалось показать.
pub(crate) fn render_detail_error(err: &QueryError) -> String {
    let meta = post_metadata(None);
    format!("{}\n{}\n{}\n", meta.title, meta.description, map_query_error(err))
}
