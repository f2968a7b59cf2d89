mod client;
mod error;
mod types;

pub use client::{TaskApiClient, smoke_test_blocking};
pub use error::ApiError;
pub use types::Task;
