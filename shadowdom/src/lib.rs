//! A small retained DOM for terminal UIs.
//!
//! Nodes live in a [`Document`] arena and are addressed by [`NodeId`]. The
//! document implements the parts of the web platform a custom element needs:
//! attributes, lifecycle callbacks, shadow roots with slots, scoped styling
//! with `::part()` hooks and inherited custom properties, and event dispatch
//! with bubbling and composed propagation. Layout and rendering target a
//! cell [`Buffer`] that a crossterm [`Terminal`] flushes.

pub mod buffer;
pub mod custom;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod event;
pub mod focus;
pub mod hit;
pub mod input;
pub mod keys;
pub mod layout;
pub mod node;
pub mod render;
pub mod style;
pub mod terminal;
pub mod text;

pub use buffer::{Buffer, Cell};
pub use custom::{Constructor, CustomElement};
pub use dispatch::{Listener, ListenerId};
pub use document::Document;
pub use error::DomError;
pub use event::Event;
pub use hit::{hit_test, hit_test_any};
pub use input::{TextEditResult, TextInputData};
pub use keys::{Key, KeyPress, Modifiers, MouseButton};
pub use layout::{layout, LayoutResult, Rect};
pub use node::{ElementData, Node, NodeId, NodeKind};
pub use render::render_to_buffer;
pub use style::{Color, Display, Rgb, Rule, Selector, Style, StyleSheet, TextStyle};
pub use terminal::Terminal;
