pub mod catalog;

pub use catalog::{PendingActivityType, ReservedActivityType};
