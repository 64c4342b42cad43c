//! Read side: pure derivation of the displayed rows and terminal rendering.
mod derive;
mod table;

pub use crate::engine::DashboardView;
pub use derive::{derive_view, matches_filter};
pub use table::{render_dashboard, render_status, render_table};
