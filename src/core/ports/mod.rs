//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the scheduling logic and the
//! outside world. Implementations live in the `adapters` module.

mod task_sink;

pub use task_sink::TaskSink;
