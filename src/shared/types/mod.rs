pub mod pagination;

pub use pagination::{validate_pagination, PaginatedResult};
