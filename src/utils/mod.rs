mod format;
mod time_utils;

pub use format::{format_currency, format_max_supply, format_number, format_percentage};
pub use time_utils::format_clock;
