//! Core crate exports for patching the graph viewer's input and opening it.
//!
//! The root module re-exports the handful of types a front end needs: the
//! [`StyleOption`] set, the [`patch`] operation, the [`Viewer`] launcher and
//! the [`Session`] that ties selection and drawing together.

pub mod app_dirs;
pub mod document;
pub mod error;
pub mod logging;
pub mod patch;
pub mod session;
pub mod style;
pub mod viewer;

pub use document::{ConfigDocument, RecordedStyle};
pub use error::{PatchError, SessionError, UnknownStyle, ViewerError};
pub use patch::{PatchReport, patch};
pub use session::{DrawReport, DrawTarget, Session};
pub use style::StyleOption;
pub use viewer::Viewer;
