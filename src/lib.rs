pub mod document;
pub mod rbac;
pub mod resources;
pub mod sample;
pub mod telemetry;
