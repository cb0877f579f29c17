pub mod console;
pub mod format;

pub use console::ConsoleReporter;
