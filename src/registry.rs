// Command registry: the ordered table of commands the terminal accepts.
// `help` lists it in registration order, so the order here is the order the
// user sees.

use crate::parse::{FlagSpec, CATEGORY, ID};

/// What a command does once resolved. The dispatcher binds each kind to its
/// handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Help,
    Clear,
    RandomJoke,
    ListCategories,
    ListJokes,
    ShowJoke,
    AddCategory,
    AddJoke,
    Like,
    Dislike,
    Exit,
}

impl Handler {
    /// Whether running this handler may await the joke service.
    pub fn calls_service(self) -> bool {
        !matches!(self, Handler::Help | Handler::Clear | Handler::Exit)
    }
}

/// Static description of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    /// Synopsis shown by `help`, e.g. `catj --id ID`.
    pub usage: &'static str,
    pub summary: &'static str,
    /// Flags this command recognises; every other token is positional.
    pub flags: &'static [FlagSpec],
    pub handler: Handler,
}

#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in command.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in builtins() {
            registry.register(descriptor);
        }
        registry
    }

    /// Add a command. A later registration under an existing name replaces
    /// the earlier one in place, keeping its position in `help`.
    pub fn register(&mut self, descriptor: CommandDescriptor) {
        match self.commands.iter_mut().find(|c| c.name == descriptor.name) {
            Some(existing) => *existing = descriptor,
            None => self.commands.push(descriptor),
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The text printed by `help`.
    pub fn help_text(&self) -> String {
        let body = self
            .commands
            .iter()
            .map(|c| format!("{}: {}", c.usage, c.summary))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("Available commands:\n\n{body}")
    }
}

fn builtins() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor {
            name: "help",
            usage: "help",
            summary: "Displays a list of available commands and their usage.",
            flags: &[],
            handler: Handler::Help,
        },
        CommandDescriptor {
            name: "clear",
            usage: "clear",
            summary: "Clears the terminal screen.",
            flags: &[],
            handler: Handler::Clear,
        },
        CommandDescriptor {
            name: "rndj",
            usage: "rndj [--category|-c CATEGORY]",
            summary: "Fetches a random joke, from all jokes or from a specific category.",
            flags: &[CATEGORY],
            handler: Handler::RandomJoke,
        },
        CommandDescriptor {
            name: "lsc",
            usage: "lsc",
            summary: "Lists all available joke categories.",
            flags: &[],
            handler: Handler::ListCategories,
        },
        CommandDescriptor {
            name: "lsj",
            usage: "lsj [--category|-c CATEGORY]",
            summary: "Lists all jokes, or all jokes in a specific category.",
            flags: &[CATEGORY],
            handler: Handler::ListJokes,
        },
        CommandDescriptor {
            name: "catj",
            usage: "catj --id ID",
            summary: "Retrieves a specific joke by its ID.",
            flags: &[ID],
            handler: Handler::ShowJoke,
        },
        CommandDescriptor {
            name: "addc",
            usage: "addc CATEGORY",
            summary: "Adds a new joke category.",
            flags: &[],
            handler: Handler::AddCategory,
        },
        CommandDescriptor {
            name: "addj",
            usage: "addj --category|-c CATEGORY [--id ID | JOKE]",
            summary: "Adds a new joke to a category, or an existing joke (by ID) to another category.",
            flags: &[CATEGORY, ID],
            handler: Handler::AddJoke,
        },
        CommandDescriptor {
            name: "good",
            usage: "good --id ID",
            summary: "Likes a joke by ID.",
            flags: &[ID],
            handler: Handler::Like,
        },
        CommandDescriptor {
            name: "bad",
            usage: "bad --id ID",
            summary: "Dislikes a joke by ID.",
            flags: &[ID],
            handler: Handler::Dislike,
        },
        CommandDescriptor {
            name: "exit",
            usage: "exit",
            summary: "Ends the terminal session.",
            flags: &[],
            handler: Handler::Exit,
        },
    ]
}
