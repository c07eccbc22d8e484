pub mod commands;
pub mod context;
pub mod dispatch;
pub mod logging;
pub mod render;
pub mod repl;

pub use context::CliContext;
pub use dispatch::respond;
pub use repl::readline;
