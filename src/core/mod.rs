pub mod retry;
pub mod service;
pub mod sink;

pub use retry::{RetryPolicy, execute_with_retry};
pub use service::TimeService;
pub use sink::{OutcomeSink, TracingSink};
