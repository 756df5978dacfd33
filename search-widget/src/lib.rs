//! `<search-widget>`: a labeled search input with an attached action button.
//!
//! The element renders into its own shadow root, mirrors the `button`,
//! `label`, `placeholder` and `value` attributes as string properties, and
//! turns a button click and an input edit into the bubbling, composed
//! [`BUTTON_ACTIVATED`] and [`INPUT_CHANGED`] notifications.
//!
//! ```no_run
//! use search_widget::{ButtonActivated, Notification, SearchElement};
//! use shadowdom::Document;
//!
//! # fn main() -> Result<(), search_widget::SearchError> {
//! let mut doc = Document::new();
//! search_widget::define(&mut doc)?;
//!
//! let search = SearchElement::create(&mut doc)?;
//! search.set_label(&mut doc, "Find")?;
//! let root = doc.root();
//! doc.append_child(root, search.node())?;
//!
//! doc.add_event_listener(root, ButtonActivated::NAME, |_, event| {
//!     if let Some(payload) = ButtonActivated::from_event(event) {
//!         println!("search for {}", payload.value);
//!     }
//! })?;
//! # Ok(())
//! # }
//! ```

mod element;
mod error;
mod events;
mod properties;
mod template;
mod widget;

pub use element::SearchElement;
pub use error::SearchError;
pub use events::{ButtonActivated, InputChanged, Notification, BUTTON_ACTIVATED, INPUT_CHANGED};
pub use properties::{SearchProperty, WidgetState};
pub use template::{styles, INPUT_BORDER_COLOR_PROPERTY};
pub use widget::SearchWidget;

use shadowdom::{Document, DomError};

/// Tag name the widget is registered under.
pub const TAG: &str = "search-widget";

/// Register `<search-widget>` with the document.
pub fn define(doc: &mut Document) -> Result<(), DomError> {
    doc.define(TAG, SearchWidget::construct)
}
