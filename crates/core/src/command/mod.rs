pub mod command_line;
pub mod legacy_shim;
pub mod synthesizer;

pub use command_line::CommandLine;
pub use legacy_shim::{install_legacy_shim, install_legacy_shim_in, legacy_shim_dir};
pub use synthesizer::{BUNDLE_EXEC, SynthesisInput, synthesize};
