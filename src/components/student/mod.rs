#[path = "record.rs"]
pub mod record;

#[path = "aggregate.rs"]
pub mod aggregate;
