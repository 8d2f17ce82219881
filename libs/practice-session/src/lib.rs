//! Practice session core
//!
//! Keeps catalog, selection, code buffer and judge results consistent while
//! catalog loads and judge responses arrive out of order with user input.

pub mod backend;
pub mod catalog;
pub mod controller;
pub mod error;
pub mod markup;
pub mod render;
pub mod session;

#[cfg(test)]
pub(crate) mod fixtures;

pub use backend::{Backend, HttpBackend};
pub use catalog::{CatalogLoader, CatalogState};
pub use controller::{Controller, SessionEvent, Surface};
pub use error::{BackendError, SessionError};
pub use render::{render, render_results, ViewRegions};
pub use session::{Session, Submission, ViewUpdate};
