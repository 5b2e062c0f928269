//! REPL command parsing.

use routina_core::product::ProductId;

/// Slash commands offered for completion, with their usage hints.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/products", "show all products"),
    ("/categories", "list categories"),
    ("/category", "[name] filter by category (no name = all)"),
    ("/search", "[term] filter by name, brand or description"),
    ("/toggle", "<id> select or unselect a product"),
    ("/remove", "<id> remove a product from the selection"),
    ("/clear", "clear the selection"),
    ("/selected", "show the selection"),
    ("/info", "<id> show product details"),
    ("/routine", "generate a routine for the selection"),
    ("/rtl", "toggle right-to-left display"),
    ("/help", "show this help"),
    ("/quit", "exit"),
];

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Products,
    Categories,
    Category(String),
    Search(String),
    Toggle(ProductId),
    Remove(ProductId),
    Clear,
    Selected,
    Info(ProductId),
    Routine,
    Rtl,
    Help,
    Quit,
    /// Anything that is not a slash command.
    Chat(String),
    /// A slash command that could not be parsed.
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if !line.starts_with('/') {
            return Command::Chat(line.to_string());
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "/products" => Command::Products,
            "/categories" => Command::Categories,
            "/category" => Command::Category(arg.to_string()),
            "/search" => Command::Search(arg.to_string()),
            "/toggle" => with_id(arg, name, Command::Toggle),
            "/remove" => with_id(arg, name, Command::Remove),
            "/info" => with_id(arg, name, Command::Info),
            "/clear" => Command::Clear,
            "/selected" => Command::Selected,
            "/routine" => Command::Routine,
            "/rtl" => Command::Rtl,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            other => Command::Invalid(format!("Unknown command: {other}")),
        }
    }
}

/// The `<id>` / `[name]` placeholder at the start of a usage string.
pub fn argument_placeholder(usage: &str) -> Option<&str> {
    let close = match usage.chars().next()? {
        '<' => '>',
        '[' => ']',
        _ => return None,
    };
    usage.find(close).map(|end| &usage[..=end])
}

fn with_id(arg: &str, name: &str, build: fn(ProductId) -> Command) -> Command {
    if arg.is_empty() {
        Command::Invalid(format!("Usage: {name} <id>"))
    } else {
        build(ProductId::parse(arg))
    }
}
