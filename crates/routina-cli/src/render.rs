//! Terminal rendering of widget views.

use std::collections::HashMap;
use std::sync::Mutex;

use colored::Colorize;
use routina_application::{ProductCard, RenderSink, WidgetView};
use routina_core::conversation::{Speaker, TranscriptEntry};
use routina_core::persistence::DisplayDirection;
use routina_core::product::{Product, ProductDetails};
use uuid::Uuid;

/// What has already been printed, so each render only prints changes.
#[derive(Default)]
struct Printed {
    /// Transcript entry id -> whether it was still pending when printed.
    entries: HashMap<Uuid, bool>,
    grid: Option<Vec<String>>,
    selection_revision: Option<u64>,
    direction: Option<DisplayDirection>,
}

/// Prints the parts of each view that changed since the previous render.
#[derive(Default)]
pub struct TerminalRenderSink {
    printed: Mutex<Printed>,
}

impl TerminalRenderSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for TerminalRenderSink {
    fn render(&self, view: &WidgetView) {
        let Ok(mut printed) = self.printed.lock() else {
            return;
        };

        if printed.direction != Some(view.direction) {
            if printed.direction.is_some() {
                println!(
                    "{}",
                    format!("Display direction: {}", view.direction).bright_black()
                );
            }
            printed.direction = Some(view.direction);
        }

        let grid = grid_lines(view);
        if printed.grid.as_ref() != Some(&grid) {
            for line in &grid {
                println!("{line}");
            }
            printed.grid = Some(grid);
        }

        if printed.selection_revision != Some(view.selection_revision) {
            if printed.selection_revision.is_some() || !view.selected.is_empty() {
                for line in selection_lines(view) {
                    println!("{line}");
                }
            }
            printed.selection_revision = Some(view.selection_revision);
        }

        for entry in &view.transcript {
            let shown_pending = printed.entries.get(&entry.id).copied();
            let needs_print = match shown_pending {
                None => true,
                Some(was_pending) => was_pending && !entry.pending,
            };
            if needs_print {
                println!("{}", transcript_line(entry, view.direction));
                printed.entries.insert(entry.id, entry.pending);
            }
        }
    }
}

fn grid_lines(view: &WidgetView) -> Vec<String> {
    if let Some(placeholder) = view.products_placeholder {
        return vec![placeholder.bright_black().to_string()];
    }
    view.products.iter().map(card_line).collect()
}

fn card_line(card: &ProductCard) -> String {
    let marker = if card.selected { "[x]" } else { "[ ]" };
    let line = format!(
        "{} {:>6}  {} - {} ({})",
        marker,
        card.product.id.to_string(),
        card.product.name,
        card.product.brand,
        card.product.category
    );
    if card.selected {
        line.bright_green().to_string()
    } else {
        line
    }
}

/// The selected-products list, or its placeholder.
pub fn selection_lines(view: &WidgetView) -> Vec<String> {
    if let Some(placeholder) = view.selected_placeholder {
        return vec![placeholder.bright_black().to_string()];
    }
    let header = format!("Selected ({}):", view.selected.len());
    let mut lines = vec![header.bright_yellow().to_string()];
    lines.extend(view.selected.iter().map(selected_line));
    lines
}

fn selected_line(product: &Product) -> String {
    format!("  - {} [{}]", product.name, product.id)
}

fn transcript_line(entry: &TranscriptEntry, direction: DisplayDirection) -> String {
    let text = align(&entry.text, direction);
    match (entry.speaker, entry.pending) {
        (Speaker::User, _) => format!("> {text}").green().to_string(),
        (Speaker::Assistant, true) => text.bright_black().italic().to_string(),
        (Speaker::Assistant, false) => text.bright_blue().to_string(),
    }
}

/// Right-aligns lines against the longest one in right-to-left mode.
fn align(text: &str, direction: DisplayDirection) -> String {
    if !direction.is_rtl() {
        return text.to_string();
    }
    let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    text.lines()
        .map(|line| format!("{line:>width$}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The "More Info" panel.
pub fn details_lines(details: &ProductDetails) -> Vec<String> {
    vec![
        details.name.bold().to_string(),
        details.brand.bright_black().to_string(),
        details.description.clone(),
    ]
}
