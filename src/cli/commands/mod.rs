pub mod tasks;
pub mod token;
