pub mod error;
pub mod task;

pub use error::TasklistError;
pub use task::{validate_title, CreateTask, Task};
