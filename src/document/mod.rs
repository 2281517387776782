//! Document state management.
//!
//! Open editor buffers are kept in memory so lookups see unsaved text.

mod state;

pub use state::{DocumentState, DocumentStore};
