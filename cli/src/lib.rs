pub mod app_state;
pub mod commands;
pub mod repl;

pub use app_state::AppState;
pub use repl::readline;
