mod core;
mod messages;
mod state;
mod store;

pub use self::core::Dashboard;
pub use messages::{Command, CommandReceiver, CommandSender, Transition};
pub use state::{DashboardState, DashboardView};
pub use store::{AssetStore, IdAliases};
