pub mod plan;
pub mod task;

pub use plan::Plan;
pub use task::{Group, Task};
