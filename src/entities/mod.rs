pub mod prelude;

pub mod category;
pub mod task;
