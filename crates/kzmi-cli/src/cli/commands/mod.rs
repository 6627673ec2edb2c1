//! CLI command handlers, one file per command.

mod categories;
mod normalize;
mod update;

pub use categories::run_categories;
pub use normalize::run_normalize;
pub use update::{run_update, UpdateArgs};
