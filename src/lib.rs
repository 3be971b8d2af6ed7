pub mod alerts;
pub mod catalog;
pub mod dashboard;
pub mod headless;
pub mod logging;
pub mod simulation;
pub mod source;
pub mod state;
pub mod telemetry;
