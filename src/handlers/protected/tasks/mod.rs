pub mod collection;
pub mod record;

pub use collection::{create, filtered, list};
pub use record::{delete, get, update};

pub const MSG_LISTED: &str = "Tasks found successfully..";
pub const MSG_FOUND: &str = "Task found successfully..";
pub const MSG_CREATED: &str = "Task created successfully..";
pub const MSG_UPDATED: &str = "Task updated successfully..";
pub const MSG_DELETED: &str = "Task deleted successfully..";
pub const MSG_FILTERED: &str = "Filtered tasks retrieved successfully..";
