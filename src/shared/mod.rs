pub mod shutdown;
pub mod types;
