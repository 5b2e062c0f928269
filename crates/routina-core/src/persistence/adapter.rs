//! Persistence adapters for the selection and the display preference.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::store::KeyValueStore;
use crate::error::Result;

/// Well-known key holding the serialized selection.
pub const SELECTION_KEY: &str = "selectedProducts";

/// Well-known key holding the right-to-left flag (`"true"` / `"false"`).
pub const DIRECTION_KEY: &str = "rtlMode";

/// Saves and loads the serialized selection under [`SELECTION_KEY`].
///
/// The adapter does not interpret the payload. An incompatible stored form
/// surfaces as a restore failure in the selection, not here.
#[derive(Clone)]
pub struct SelectionPersistence {
    store: Arc<dyn KeyValueStore>,
}

impl SelectionPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, serialized: &str) -> Result<()> {
        self.store.set(SELECTION_KEY, serialized)
    }

    pub fn load(&self) -> Result<Option<String>> {
        self.store.get(SELECTION_KEY)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(SELECTION_KEY)
    }
}

/// Text direction of the widget.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DisplayDirection {
    #[default]
    Ltr,
    Rtl,
}

impl DisplayDirection {
    pub fn toggled(self) -> Self {
        match self {
            DisplayDirection::Ltr => DisplayDirection::Rtl,
            DisplayDirection::Rtl => DisplayDirection::Ltr,
        }
    }

    pub fn is_rtl(self) -> bool {
        self == DisplayDirection::Rtl
    }
}

/// Saves and loads the [`DisplayDirection`] under [`DIRECTION_KEY`].
#[derive(Clone)]
pub struct PreferencePersistence {
    store: Arc<dyn KeyValueStore>,
}

impl PreferencePersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save_direction(&self, direction: DisplayDirection) -> Result<()> {
        let flag = if direction.is_rtl() { "true" } else { "false" };
        self.store.set(DIRECTION_KEY, flag)
    }

    /// Only an exact `"true"` selects right-to-left.
    pub fn load_direction(&self) -> Result<DisplayDirection> {
        Ok(match self.store.get(DIRECTION_KEY)?.as_deref() {
            Some("true") => DisplayDirection::Rtl,
            _ => DisplayDirection::Ltr,
        })
    }
}
