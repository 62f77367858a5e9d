//! Progress rate-limiting for the download consumer.

mod throttle;

pub use throttle::ProgressThrottle;
