//! Render model handed to the presentation layer.

use routina_core::conversation::TranscriptEntry;
use routina_core::persistence::DisplayDirection;
use routina_core::product::{CatalogState, Product};
use serde::Serialize;

/// A visible product with its selection flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub product: Product,
    pub selected: bool,
}

/// Snapshot of everything the widget shows.
///
/// Built fresh after every state change; holds copies, never references into
/// the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    pub catalog_state: CatalogState,
    /// Products passing the current filter, in catalog order.
    pub products: Vec<ProductCard>,
    /// Shown instead of the product grid when set.
    pub products_placeholder: Option<&'static str>,
    /// Selected products in selection order.
    pub selected: Vec<Product>,
    pub selected_placeholder: Option<&'static str>,
    pub transcript: Vec<TranscriptEntry>,
    pub direction: DisplayDirection,
    pub selection_revision: u64,
}

/// The presentation layer.
///
/// `render` is called once after each state change with a full snapshot.
pub trait RenderSink: Send + Sync {
    fn render(&self, view: &WidgetView);
}

/// Sink that discards every view.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn render(&self, _view: &WidgetView) {}
}
