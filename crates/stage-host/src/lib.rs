pub mod demo;
pub mod logging;
pub mod runner;

pub use logging::{init_logging, LoggingConfig};
pub use runner::StageRunner;
