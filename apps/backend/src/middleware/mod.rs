pub mod request_trace;
pub mod structured_logger;

pub use request_trace::{current_trace_id, RequestTrace, TraceId};
pub use structured_logger::StructuredLogger;
