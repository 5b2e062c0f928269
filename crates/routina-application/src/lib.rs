//! Application layer for routina.
//!
//! Wires the catalog, selection, filter, persistence and relay from
//! `routina-core` into a single [`WidgetSession`] that drives a
//! [`RenderSink`] after every state change.

pub mod messages;
pub mod session;
pub mod view;

pub use session::{PendingRelay, RelayKind, TurnOutcome, WidgetSession};
pub use view::{NullRenderSink, ProductCard, RenderSink, WidgetView};
