//! Entry list formatting and display
//!
//! - `config` - Output configuration types
//! - `list` - Plain and long line-per-entry listings, with colors
//! - `json` - JSON output
//! - `utils` - Size, mode, time and path rendering

mod config;
mod json;
mod list;
mod utils;

pub use config::OutputConfig;
pub use json::{JsonEntry, print_json, to_json};
pub use list::ListFormatter;
pub use utils::{display_path, format_mode, format_size, format_time};
