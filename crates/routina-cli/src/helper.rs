use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::{COMMANDS, argument_placeholder};

/// rustyline helper: completes slash commands and catalog categories, and
/// hints the argument a command expects.
#[derive(Clone, Default)]
pub struct CliHelper {
    categories: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the category names offered after `/category `.
    pub fn set_categories<'a>(&mut self, categories: impl IntoIterator<Item = &'a str>) {
        self.categories = categories.into_iter().map(str::to_string).collect();
    }

    fn command_pairs(&self, typed: &str) -> Vec<Pair> {
        COMMANDS
            .iter()
            .filter(|(name, _)| name.starts_with(typed))
            .map(|(name, usage)| match argument_placeholder(usage) {
                Some(arg) => Pair {
                    display: format!("{name} {arg}"),
                    replacement: format!("{name} "),
                },
                None => Pair {
                    display: name.to_string(),
                    replacement: name.to_string(),
                },
            })
            .collect()
    }

    fn category_pairs(&self, typed: &str) -> Vec<Pair> {
        self.categories
            .iter()
            .filter(|c| c.starts_with(typed))
            .map(|c| Pair {
                display: c.clone(),
                replacement: c.clone(),
            })
            .collect()
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if let Some(typed) = line.strip_prefix("/category ") {
            let start = line.len() - typed.len();
            return Ok((start, self.category_pairs(typed)));
        }
        if line.starts_with('/') && !line.contains(' ') {
            return Ok((0, self.command_pairs(line)));
        }
        Ok((0, vec![]))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    /// Completes a partial command name, then shows the argument it takes.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return None;
        }

        let (name, rest) = match line.split_once(' ') {
            Some((name, rest)) => (name, Some(rest)),
            None => (line, None),
        };
        let (full, usage) = match rest {
            Some(_) => COMMANDS.iter().find(|(cmd, _)| *cmd == name)?,
            None => COMMANDS.iter().find(|(cmd, _)| cmd.starts_with(name))?,
        };
        let arg = argument_placeholder(usage);

        let hint = match rest {
            None => Some(match arg {
                Some(arg) => format!("{} {arg}", &full[name.len()..]),
                None => full[name.len()..].to_string(),
            }),
            Some("") => arg.map(str::to_string),
            Some(_) => None,
        };
        hint.filter(|hint| !hint.is_empty())
    }
}

impl Validator for CliHelper {}
