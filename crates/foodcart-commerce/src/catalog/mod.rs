//! Menu catalog module.
//!
//! Contains menu items and the pending per-item selection.

mod menu;
mod selection;

pub use menu::{Menu, MenuItem};
pub use selection::ItemSelection;
