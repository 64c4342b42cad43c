// Session wiring and user input
mod input;
mod session;

pub use input::{HELP, UserInput, parse_input};
pub use session::{build_dashboard, demo_snapshot};
