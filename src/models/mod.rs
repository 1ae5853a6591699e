pub mod filter;
pub mod timestamp;
pub mod todo;
pub mod view;

pub use filter::TodoFilter;
pub use todo::{Priority, Todo, TodoRequest};
pub use view::{TodoDetail, TodoSummary};
