pub mod account_linker;
pub mod error;
pub mod merge;
pub mod retry;

pub use account_linker::AccountLinker;
pub use error::{LinkError, Result};
pub use merge::plan_merge;
pub use retry::{Backoff, ConflictError, RetryConfig, retry_on_conflict};

#[cfg(test)]
mod tests;
