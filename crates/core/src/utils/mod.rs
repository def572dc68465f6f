pub mod serde_helpers;

pub use serde_helpers::{null_as_default, one_or_many};
