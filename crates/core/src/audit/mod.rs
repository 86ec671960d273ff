//! Run log.
//!
//! Every candidate leaves a trail here: one entry when its prompt is
//! generated and one when it is published. The log can be queried back
//! (filtered by run, status or time) and rendered as a plain-text document.

mod entry;
mod sqlite;
mod store;

pub use entry::*;
pub use sqlite::*;
pub use store::*;
