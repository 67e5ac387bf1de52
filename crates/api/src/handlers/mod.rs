pub mod catalog;
pub mod discussion;
pub mod progress;
