pub mod logging;
pub mod rect;
pub mod time;

pub use logging::{StdoutLogger, init_stdout_logger};
pub use rect::Rect;
pub use time::now_ns;

// Re-export log so downstream crates can use rover_base::log::*
pub use log;
