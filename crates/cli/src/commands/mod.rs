pub mod events;
pub mod init;
pub mod run;
pub mod show;

pub use events::{added_command, modified_command, removed_command};
pub use init::init_command;
pub use run::run_command;
pub use show::show_command;
