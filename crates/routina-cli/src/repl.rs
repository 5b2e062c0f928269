//! The interactive loop.

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use routina_application::{TurnOutcome, WidgetSession};
use routina_core::filter::FilterCriteria;
use routina_core::product::CatalogState;

use crate::commands::{COMMANDS, Command};
use crate::helper::CliHelper;
use crate::render::{details_lines, selection_lines};

/// Reads lines until `/quit`, Ctrl-D or Ctrl-C.
pub async fn run(session: &mut WidgetSession) -> Result<()> {
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));
    refresh_categories(&mut rl, session);

    println!("{}", "=== Routina ===".bright_magenta().bold());
    println!(
        "{}",
        "Type /help for commands. Anything else is sent to the advisor.".bright_black()
    );
    if session.catalog_state() == CatalogState::Failed {
        println!(
            "{}",
            "The product catalog could not be loaded; see the log for details.".yellow()
        );
    }
    println!();

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());

        if !handle(session, Command::parse(&line)).await {
            println!("{}", "Goodbye!".bright_green());
            break;
        }
        refresh_categories(&mut rl, session);
    }

    Ok(())
}

/// Filter input can reload the catalog, so completion follows it.
fn refresh_categories(rl: &mut Editor<CliHelper, DefaultHistory>, session: &WidgetSession) {
    if let Some(helper) = rl.helper_mut() {
        helper.set_categories(session.catalog().categories());
    }
}

/// Executes one command. Returns false when the loop should stop.
async fn handle(session: &mut WidgetSession, command: Command) -> bool {
    match command {
        Command::Products => session.set_filter(FilterCriteria::default()).await,
        Command::Categories => {
            let categories = session.catalog().categories();
            if categories.is_empty() {
                println!("{}", "No categories available".bright_black());
            }
            for category in categories {
                println!("  {category}");
            }
        }
        Command::Category(name) => session.set_category(name).await,
        Command::Search(term) => session.set_search(term).await,
        Command::Toggle(id) => {
            if let Err(e) = session.toggle(&id) {
                println!("{}", e.to_string().red());
            }
        }
        Command::Remove(id) => {
            if session.remove(&id).is_none() {
                println!("{}", format!("Product {id} is not selected").bright_black());
            }
        }
        Command::Clear => {
            session.clear();
        }
        Command::Selected => {
            for line in selection_lines(&session.view()) {
                println!("{line}");
            }
        }
        Command::Info(id) => match session.product_details(&id) {
            Ok(details) => {
                for line in details_lines(&details) {
                    println!("{line}");
                }
            }
            Err(e) => println!("{}", e.to_string().red()),
        },
        Command::Routine => report(session.generate_routine().await),
        Command::Rtl => {
            session.toggle_direction();
        }
        Command::Help => print_help(),
        Command::Quit => return false,
        Command::Chat(text) => report(session.send_chat(&text).await),
        Command::Invalid(message) => println!("{}", message.yellow()),
    }
    true
}

fn report(outcome: TurnOutcome) {
    if let TurnOutcome::Failed { request_id, error } = outcome {
        tracing::debug!(%request_id, %error, "turn failed");
    }
}

fn print_help() {
    for (name, usage) in COMMANDS {
        println!("  {} {}", format!("{name:<12}").bright_cyan(), usage.bright_black());
    }
}
