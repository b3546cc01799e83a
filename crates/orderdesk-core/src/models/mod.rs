mod order;

pub use order::{NewOrder, Order, OrderSubmissionResponse};
