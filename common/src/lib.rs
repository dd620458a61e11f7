pub mod error;
pub mod parser;
pub mod util;

/// Bandwidth reported by fio in KiB/s, divided by this to give MB/s in the report
pub const KB_PER_MB: f64 = 1024.0;
/// Nanoseconds per microsecond
pub const NS_PER_US: f64 = 1000.0;
