pub mod command_breakdown;
pub mod console;

pub use command_breakdown::{format_command_breakdown, print_command_breakdown};
pub use console::{ConsoleMessenger, ConsoleNotifier};
