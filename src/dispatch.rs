// Dispatcher: turns one submitted line into at most one response entry.
//
// Every line goes through the same pipeline. Parsing and resolution are
// synchronous; the joke service call is the only await. Whatever happens in
// between (unknown command, missing argument, backend failure) the line is
// recorded and the interpreter is ready for the next one.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::parse::{tokenize, ParsedCommand, CATEGORY, ID};
use crate::registry::{CommandRegistry, Handler};
use crate::service::{Joke, JokeService, ServiceError};
use crate::session::SessionLog;

pub const NOT_FOUND: &str = "Command not found. Type \"help\" for available commands.";
pub const MISSING_ID: &str = "Please provide a joke ID using --id";
pub const MISSING_CATEGORY_NAME: &str = "Please provide a category name.";
pub const MISSING_CATEGORY: &str = "Please provide a category using --category or -c";
pub const MISSING_CONTENT: &str = "Please provide joke content.";

/// Where the pipeline is for the line currently being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Parsing,
    Resolving,
    Invoking,
    Completed,
}

/// What the caller should do after a line has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

enum Reply {
    Text(String),
    Clear,
    Exit,
}

/// One interactive session: the command table, the backend and the
/// scrollback. `submit` borrows the interpreter mutably, so a second line
/// cannot be submitted until the first has completed.
pub struct Interpreter<S> {
    service: S,
    registry: Arc<CommandRegistry>,
    log: SessionLog,
    state: State,
}

impl<S: JokeService> Interpreter<S> {
    /// A session with the built-in commands.
    pub fn new(service: S) -> Self {
        Self::with_registry(service, Arc::new(CommandRegistry::with_builtins()))
    }

    pub fn with_registry(service: S, registry: Arc<CommandRegistry>) -> Self {
        Interpreter {
            service,
            registry,
            log: SessionLog::new(),
            state: State::Idle,
        }
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, State::Parsing | State::Resolving | State::Invoking)
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Whether `line` resolves to a command that waits on the joke service,
    /// i.e. whether submitting it will pass through `Invoking` with an await.
    pub fn needs_service(&self, line: &str) -> bool {
        tokenize(line)
            .first()
            .and_then(|name| self.registry.resolve(name))
            .is_some_and(|d| d.handler.calls_service())
    }

    /// Process one raw input line to completion.
    ///
    /// Appends the line as an input entry, then either one output entry, or
    /// nothing for `clear` (which empties the log) and `exit`.
    pub async fn submit(&mut self, line: &str) -> Flow {
        if self.is_busy() {
            // Only reachable if a previous submit future was dropped mid-call.
            warn!(state = ?self.state, "previous command did not complete; discarding it");
        }

        self.state = State::Parsing;
        let tokens = tokenize(line);

        self.state = State::Resolving;
        let registry = Arc::clone(&self.registry);
        let resolved = tokens
            .split_first()
            .and_then(|(name, args)| registry.resolve(name).map(|d| (d, name, args)));

        self.log.push_input(line);

        let reply = match resolved {
            None => {
                debug!(line, "no such command");
                Reply::Text(NOT_FOUND.to_owned())
            }
            Some((descriptor, name, args)) => {
                let command = ParsedCommand::new(name, args, descriptor.flags);
                debug!(command = descriptor.name, flags = ?command.flags, "resolved command");
                self.state = State::Invoking;
                match self.invoke(descriptor.handler, &command).await {
                    Ok(reply) => reply,
                    Err(err) => {
                        warn!(command = descriptor.name, error = %err, "joke service call failed");
                        Reply::Text(format!("Error: {err}"))
                    }
                }
            }
        };

        self.state = State::Completed;
        match reply {
            Reply::Text(text) => {
                self.log.push_output(text);
                Flow::Continue
            }
            Reply::Clear => {
                self.log.clear();
                Flow::Continue
            }
            Reply::Exit => Flow::Exit,
        }
    }

    async fn invoke(&self, handler: Handler, cmd: &ParsedCommand) -> Result<Reply, ServiceError> {
        let service = &self.service;
        let text = match handler {
            Handler::Help => self.registry.help_text(),
            Handler::Clear => return Ok(Reply::Clear),
            Handler::Exit => return Ok(Reply::Exit),
            Handler::RandomJoke => {
                let joke = service.random_joke(cmd.flag(CATEGORY.name)).await?;
                format_joke(&joke)
            }
            Handler::ListCategories => {
                let categories = service.list_categories().await?;
                format!("Available Categories:\n{}", categories.join("\n"))
            }
            Handler::ListJokes => {
                let jokes = service.list_jokes(cmd.flag(CATEGORY.name)).await?;
                format!("HaHaSaaS:\n{}", jokes.join("\n"))
            }
            Handler::ShowJoke => match cmd.flag(ID.name) {
                None => MISSING_ID.to_owned(),
                Some(id) => format_joke(&service.joke_by_id(id).await?),
            },
            Handler::AddCategory => {
                let name = cmd.rest();
                if name.is_empty() {
                    MISSING_CATEGORY_NAME.to_owned()
                } else {
                    service.create_category(&name).await?;
                    "Category added successfully".to_owned()
                }
            }
            Handler::AddJoke => self.add_joke(cmd).await?,
            Handler::Like => match cmd.flag(ID.name) {
                None => MISSING_ID.to_owned(),
                Some(id) => {
                    service.like_joke(id).await?;
                    "Joke liked successfully".to_owned()
                }
            },
            Handler::Dislike => match cmd.flag(ID.name) {
                None => MISSING_ID.to_owned(),
                Some(id) => {
                    service.dislike_joke(id).await?;
                    "Joke disliked successfully".to_owned()
                }
            },
        };
        Ok(Reply::Text(text))
    }

    /// `addj` has two exclusive modes: with `--id` it files an existing joke
    /// under the category, otherwise the positional text becomes a new joke.
    async fn add_joke(&self, cmd: &ParsedCommand) -> Result<String, ServiceError> {
        let Some(category) = cmd.flag(CATEGORY.name) else {
            return Ok(MISSING_CATEGORY.to_owned());
        };

        if cmd.has_flag(ID.name) {
            let Some(id) = cmd.flag(ID.name) else {
                return Ok(MISSING_ID.to_owned());
            };
            self.service.attach_joke(id, category).await?;
            return Ok("Joke added to category successfully".to_owned());
        }

        let content = cmd.rest();
        if content.is_empty() {
            return Ok(MISSING_CONTENT.to_owned());
        }
        self.service.create_joke(&content, category).await?;
        Ok("Joke added successfully".to_owned())
    }
}

/// Single-line rendering of a joke and its reactions.
pub fn format_joke(joke: &Joke) -> String {
    format!(
        "ID: {} | Content: {} | Likes: {} | Dislikes: {}",
        joke.id, joke.content, joke.likes, joke.dislikes
    )
}
