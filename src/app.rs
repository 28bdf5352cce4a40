//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog store, the
//! query parameters, the selection and the current input mode.

mod model;

pub use model::*;
