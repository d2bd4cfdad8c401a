//! Document model: data types, factories, reducer and JSON snapshots

mod defaults;
mod document;
mod reducer;
mod snapshot;

pub use defaults::*;
pub use document::*;
pub use reducer::*;
pub use snapshot::*;
