pub mod aggregate;

pub use aggregate::{OrderLineRecord, REQUIRED_COLUMNS};
