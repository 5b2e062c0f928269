//! Fixed user-visible texts of the widget.

pub const SELECT_CATEGORY_PLACEHOLDER: &str = "Select a category to view products";
pub const NO_PRODUCTS_PLACEHOLDER: &str = "No products found for this category";
pub const NO_SELECTION_PLACEHOLDER: &str = "No products selected yet";

pub const THINKING: &str = "Thinking...";
pub const CHAT_FALLBACK: &str = "Sorry, I couldn’t find an answer.";
pub const CHAT_ERROR: &str = "Error connecting to AI. Check your Worker setup.";

pub const ROUTINE_GUIDANCE: &str =
    "Please select at least one product before generating a routine.";
pub const ROUTINE_REQUEST: &str = "Generate a skincare routine for my selected products.";
pub const ROUTINE_BUILDING: &str = "Building your personalized routine...";
pub const ROUTINE_FALLBACK: &str = "Sorry, I couldn’t generate a routine right now.";
pub const ROUTINE_ERROR: &str = "Error connecting to the AI. Please check your Worker URL.";

/// System prompt for routine generation. The selected products follow as the
/// user message.
pub const ROUTINE_SYSTEM_PROMPT: &str = "You are a skincare and beauty advisor. \
Using ONLY the selected products, build a practical, safe daily routine. \
Include AM/PM steps, frequency, and short reasoning. \
Avoid recommending outside products. Keep it concise and professional.";
