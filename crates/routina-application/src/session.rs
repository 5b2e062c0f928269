//! The widget session: one context object owning all widget state.

use std::sync::Arc;

use routina_core::conversation::{ChatMessage, ChatRelay, RelayError, RequestId, Transcript};
use routina_core::error::{Result, RoutinaError};
use routina_core::filter::FilterCriteria;
use routina_core::persistence::{
    DisplayDirection, KeyValueStore, PreferencePersistence, SelectionPersistence,
};
use routina_core::product::{
    Catalog, CatalogSource, CatalogState, CatalogStore, Product, ProductDetails, ProductId,
};
use routina_core::selection::{SelectionChange, SelectionSet};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::messages::{
    CHAT_ERROR, CHAT_FALLBACK, NO_PRODUCTS_PLACEHOLDER, NO_SELECTION_PLACEHOLDER, ROUTINE_BUILDING,
    ROUTINE_ERROR, ROUTINE_FALLBACK, ROUTINE_GUIDANCE, ROUTINE_REQUEST, ROUTINE_SYSTEM_PROMPT,
    SELECT_CATEGORY_PLACEHOLDER, THINKING,
};
use crate::view::{ProductCard, RenderSink, WidgetView};

/// Which flow started a relay call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    Chat,
    Routine,
}

impl RelayKind {
    fn fallback(self) -> &'static str {
        match self {
            RelayKind::Chat => CHAT_FALLBACK,
            RelayKind::Routine => ROUTINE_FALLBACK,
        }
    }

    fn failure(self) -> &'static str {
        match self {
            RelayKind::Chat => CHAT_ERROR,
            RelayKind::Routine => ROUTINE_ERROR,
        }
    }
}

/// A relay call that has been started but not yet completed.
///
/// Carries the history snapshot to send and the placeholder line its outcome
/// will replace.
#[derive(Debug, Clone)]
pub struct PendingRelay {
    pub request_id: RequestId,
    pub kind: RelayKind,
    pub messages: Vec<ChatMessage>,
    placeholder: Uuid,
}

/// Result of a chat turn or routine request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing was sent: empty chat input, or routine requested with an
    /// empty selection.
    Skipped,
    /// The relay answered with text.
    Replied { request_id: RequestId, text: String },
    /// The relay answered without text; the fallback line is shown.
    NoReply { request_id: RequestId },
    /// The round trip failed; the error line is shown.
    Failed {
        request_id: RequestId,
        error: RelayError,
    },
}

impl TurnOutcome {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            TurnOutcome::Skipped => None,
            TurnOutcome::Replied { request_id, .. }
            | TurnOutcome::NoReply { request_id }
            | TurnOutcome::Failed { request_id, .. } => Some(*request_id),
        }
    }
}

/// Owns the catalog, selection, filter, transcript and relay history of one
/// widget instance.
///
/// Every operation that changes what the user sees ends with exactly one
/// render. Operations that change the selection also perform exactly one
/// persistence write, before the render. Persistence failures are logged
/// and never returned.
pub struct WidgetSession {
    catalog: CatalogStore,
    selection: SelectionSet,
    criteria: FilterCriteria,
    /// False until the first filter input; drives the initial placeholder.
    filter_touched: bool,
    transcript: Transcript,
    history: Vec<ChatMessage>,
    next_request_id: u64,
    direction: DisplayDirection,
    selection_store: SelectionPersistence,
    preferences: PreferencePersistence,
    source: Arc<dyn CatalogSource>,
    relay: Arc<dyn ChatRelay>,
    sink: Arc<dyn RenderSink>,
}

impl WidgetSession {
    /// Creates an empty session. Nothing is loaded until [`start`](Self::start).
    pub fn new(
        source: Arc<dyn CatalogSource>,
        relay: Arc<dyn ChatRelay>,
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn RenderSink>,
    ) -> Self {
        Self {
            catalog: CatalogStore::new(),
            selection: SelectionSet::new(),
            criteria: FilterCriteria::default(),
            filter_touched: false,
            transcript: Transcript::new(),
            history: Vec::new(),
            next_request_id: 1,
            direction: DisplayDirection::default(),
            selection_store: SelectionPersistence::new(Arc::clone(&store)),
            preferences: PreferencePersistence::new(store),
            source,
            relay,
            sink,
        }
    }

    /// Restores the display direction, loads the catalog, restores the
    /// saved selection and renders.
    pub async fn start(&mut self) -> CatalogState {
        self.direction = match self.preferences.load_direction() {
            Ok(direction) => direction,
            Err(e) => {
                warn!(error = %e, "failed to read display direction");
                DisplayDirection::default()
            }
        };
        let state = self.load_catalog().await;
        self.render();
        state
    }

    /// Reloads the catalog from the source. A successful load is followed by
    /// a restore of the saved selection.
    pub async fn load_catalog(&mut self) -> CatalogState {
        let state = self.catalog.load(self.source.as_ref()).await;
        if state == CatalogState::Loaded {
            self.restore_selection();
        }
        state
    }

    fn restore_selection(&mut self) {
        match self.selection_store.load() {
            Ok(Some(saved)) if !saved.is_empty() => {
                // Failures are logged by the selection itself and leave it empty.
                if self.selection.restore(&saved).is_ok() {
                    info!(count = self.selection.len(), "restored saved selection");
                }
            }
            Ok(_) => debug!("no saved selection"),
            Err(e) => error!(error = %e, "failed to read saved selection"),
        }
    }

    // ---- Filtering ----

    /// Applies new filter criteria and renders.
    ///
    /// If the catalog is still empty it is (re)loaded first.
    pub async fn set_filter(&mut self, criteria: FilterCriteria) {
        if self.catalog.catalog().is_empty() {
            debug!("catalog empty on filter input, loading");
            self.load_catalog().await;
        }
        self.criteria = criteria;
        self.filter_touched = true;
        self.render();
    }

    /// Changes the category, keeping the search term.
    pub async fn set_category(&mut self, category: impl Into<String>) {
        let criteria = FilterCriteria::new(category, self.criteria.search_term.clone());
        self.set_filter(criteria).await;
    }

    /// Changes the search term, keeping the category.
    pub async fn set_search(&mut self, search_term: impl Into<String>) {
        let criteria = FilterCriteria::new(self.criteria.category.clone(), search_term);
        self.set_filter(criteria).await;
    }

    // ---- Selection ----

    /// Toggles the catalog product with `id`.
    ///
    /// `id` may be user-typed; see [`Catalog::resolve`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the catalog has no such product; nothing is
    /// written or rendered then.
    pub fn toggle(&mut self, id: &ProductId) -> Result<SelectionChange> {
        let product = self
            .catalog
            .catalog()
            .resolve(id)
            .cloned()
            .ok_or_else(|| RoutinaError::not_found("product", id.to_string()))?;

        let change = self.selection.toggle(&product);
        debug!(?change, "selection toggled");
        self.selection_changed();
        Ok(change)
    }

    /// Removes `id` from the selection, whether or not it is in the catalog.
    ///
    /// Returns `None` (no write, no render) when it was not selected.
    pub fn remove(&mut self, id: &ProductId) -> Option<SelectionChange> {
        let selected = self.selected_copy(id)?.id.clone();
        let change = self.selection.remove(&selected)?;
        self.selection_changed();
        Some(change)
    }

    pub fn clear(&mut self) -> SelectionChange {
        let change = self.selection.clear();
        self.selection_changed();
        change
    }

    /// The selected copy for a user-typed id, exact matches first.
    fn selected_copy(&self, id: &ProductId) -> Option<&Product> {
        let selected = self.selection.products();
        selected
            .iter()
            .find(|p| &p.id == id)
            .or_else(|| selected.iter().find(|p| p.id.reads_as(id)))
    }

    fn selection_changed(&mut self) {
        self.persist_selection();
        self.render();
    }

    fn persist_selection(&self) {
        let saved = self
            .selection
            .serialize()
            .and_then(|serialized| self.selection_store.save(&serialized));
        if let Err(e) = saved {
            error!(error = %e, "failed to save selection");
        }
    }

    // ---- Details and preferences ----

    /// Name, brand and description of a product.
    ///
    /// Falls back to the selected copy when the catalog no longer has `id`.
    pub fn product_details(&self, id: &ProductId) -> Result<ProductDetails> {
        self.catalog
            .catalog()
            .resolve(id)
            .or_else(|| self.selected_copy(id))
            .map(ProductDetails::from)
            .ok_or_else(|| RoutinaError::not_found("product", id.to_string()))
    }

    /// Flips the display direction, saves it and renders.
    pub fn toggle_direction(&mut self) -> DisplayDirection {
        self.direction = self.direction.toggled();
        if let Err(e) = self.preferences.save_direction(self.direction) {
            error!(error = %e, "failed to save display direction");
        }
        self.render();
        self.direction
    }

    // ---- Conversation ----

    /// Runs a full chat turn. See [`begin_chat`](Self::begin_chat).
    pub async fn send_chat(&mut self, input: &str) -> TurnOutcome {
        match self.begin_chat(input) {
            Some(pending) => self.dispatch(pending).await,
            None => TurnOutcome::Skipped,
        }
    }

    /// Runs a full routine request. See [`begin_routine`](Self::begin_routine).
    pub async fn generate_routine(&mut self) -> TurnOutcome {
        match self.begin_routine() {
            Some(pending) => self.dispatch(pending).await,
            None => TurnOutcome::Skipped,
        }
    }

    async fn dispatch(&mut self, pending: PendingRelay) -> TurnOutcome {
        let relay = Arc::clone(&self.relay);
        let outcome = relay
            .complete(pending.request_id, pending.messages.clone())
            .await;
        self.complete_relay(pending, outcome)
    }

    /// Starts a chat turn.
    ///
    /// The input is trimmed; blank input returns `None` and changes nothing.
    /// Otherwise the user line and a "Thinking..." placeholder are shown and
    /// the user message is appended to the history.
    pub fn begin_chat(&mut self, input: &str) -> Option<PendingRelay> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        self.transcript.push_user(text);
        self.history.push(ChatMessage::user(text));
        let placeholder = self.transcript.push_pending(THINKING);
        let pending = self.pending(RelayKind::Chat, placeholder);
        self.render();
        Some(pending)
    }

    /// Starts a routine request over the current selection.
    ///
    /// With an empty selection a guidance line is shown and `None` is
    /// returned. Otherwise the history is replaced by the routine prompt and
    /// the selected products as JSON.
    pub fn begin_routine(&mut self) -> Option<PendingRelay> {
        if self.selection.is_empty() {
            self.transcript.push_assistant(ROUTINE_GUIDANCE);
            self.render();
            return None;
        }

        let products = match self.selection.serialize() {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize selection for routine");
                self.transcript.push_assistant(ROUTINE_ERROR);
                self.render();
                return None;
            }
        };

        self.transcript.push_user(ROUTINE_REQUEST);
        let placeholder = self.transcript.push_pending(ROUTINE_BUILDING);
        self.history = vec![
            ChatMessage::system(ROUTINE_SYSTEM_PROMPT),
            ChatMessage::user(products),
        ];
        let pending = self.pending(RelayKind::Routine, placeholder);
        self.render();
        Some(pending)
    }

    fn pending(&mut self, kind: RelayKind, placeholder: Uuid) -> PendingRelay {
        let request_id = RequestId(self.next_request_id);
        self.next_request_id += 1;
        debug!(%request_id, ?kind, messages = self.history.len(), "relay call started");
        PendingRelay {
            request_id,
            kind,
            messages: self.history.clone(),
            placeholder,
        }
    }

    /// Applies the outcome of a relay call started by `begin_chat` or
    /// `begin_routine`, replacing that call's placeholder, and renders.
    ///
    /// A reply (or the fallback text) is appended to the history as the
    /// assistant turn. A failure leaves the history untouched.
    pub fn complete_relay(
        &mut self,
        pending: PendingRelay,
        outcome: std::result::Result<Option<String>, RelayError>,
    ) -> TurnOutcome {
        let request_id = pending.request_id;
        let result = match outcome {
            Ok(Some(text)) => {
                self.settle(&pending, &text);
                TurnOutcome::Replied { request_id, text }
            }
            Ok(None) => {
                debug!(%request_id, "relay reply had no text");
                self.settle(&pending, pending.kind.fallback());
                TurnOutcome::NoReply { request_id }
            }
            Err(error) => {
                error!(%request_id, error = %error, "relay call failed");
                self.transcript
                    .resolve(pending.placeholder, pending.kind.failure());
                TurnOutcome::Failed { request_id, error }
            }
        };
        self.render();
        result
    }

    fn settle(&mut self, pending: &PendingRelay, text: &str) {
        self.transcript.resolve(pending.placeholder, text);
        self.history.push(ChatMessage::assistant(text));
    }

    // ---- Rendering and accessors ----

    fn render(&self) {
        self.sink.render(&self.view());
    }

    /// Builds the current render snapshot.
    pub fn view(&self) -> WidgetView {
        let (products, products_placeholder) = if self.filter_touched {
            let cards: Vec<ProductCard> = self
                .catalog
                .catalog()
                .filtered(&self.criteria)
                .into_iter()
                .map(|p| ProductCard {
                    product: p.clone(),
                    selected: self.selection.contains(&p.id),
                })
                .collect();
            let placeholder = cards.is_empty().then_some(NO_PRODUCTS_PLACEHOLDER);
            (cards, placeholder)
        } else {
            (Vec::new(), Some(SELECT_CATEGORY_PLACEHOLDER))
        };

        WidgetView {
            catalog_state: self.catalog.state(),
            products,
            products_placeholder,
            selected: self.selection.products().to_vec(),
            selected_placeholder: self
                .selection
                .is_empty()
                .then_some(NO_SELECTION_PLACEHOLDER),
            transcript: self.transcript.entries().to_vec(),
            direction: self.direction,
            selection_revision: self.selection.revision(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog.catalog()
    }

    pub fn catalog_state(&self) -> CatalogState {
        self.catalog.state()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Messages that the next chat turn would build on.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn direction(&self) -> DisplayDirection {
        self.direction
    }
}
