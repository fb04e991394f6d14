pub mod app;
pub mod cli;
pub mod logging;
pub mod render;

pub use app::run;
pub use cli::Cli;
