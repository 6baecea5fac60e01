//! CLI command handlers. Each command is in its own file.

mod classify;
mod expand;
mod menu;
mod pivot;
mod prefs;
mod sanitise;

pub use classify::run_classify;
pub use expand::run_expand;
pub use menu::run_menu;
pub use pivot::{run_pivot, PivotArgs};
pub use prefs::run_prefs;
pub use sanitise::run_sanitise;
