pub mod task;

pub use task::{
    parse_timestamp, wire_timestamp, Task, TaskContent, TaskCriteria, TaskFields, TaskFilterParams,
    CONTENT_FIELDS,
};
