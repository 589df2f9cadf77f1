//! Contracts for the browser primitives the navigation layer drives.
//!
//! Each primitive is a trait with a headless in-memory implementation;
//! content fetching additionally has an HTTP implementation.

mod document;
mod element;
mod history;
mod source;
mod transition;

pub use document::{Document, HeadlessDocument};
pub use element::Element;
pub use history::{History, MemoryHistory};
pub use source::{ContentSource, HttpContentSource};
pub use transition::{CrossfadeTransition, UpdateFuture, ViewTransition};
