mod constants;
mod telemetry;

pub use constants::access_code;
pub use telemetry::CpuTelemetry;
