mod enums;
mod models;
mod views;

pub use enums::{LogicalOperator, SortDirection, ViewType};
pub use models::*;
pub use views::*;
