//! CLI command handlers. Each command is in its own file.

mod checksum;
mod list;
mod sync;

pub use checksum::run_checksum;
pub use list::run_list;
pub use sync::run_sync;
