mod bulk;
mod generate;
mod info;
mod init;
mod list;
mod update;

pub use bulk::{BulkSummary, run_all};
pub use generate::{describe_working_copy, discover_working_copies};
pub use info::info_project;
pub use init::checkout_project;
pub use list::list_lines;
pub use update::update_project;
