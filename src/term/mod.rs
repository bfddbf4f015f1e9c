//! Terminal front end.

mod renderer;

pub use renderer::TerminalRenderer;
