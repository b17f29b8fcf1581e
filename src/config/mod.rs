pub mod defaults;
pub mod loader;
pub mod types;

pub use defaults::{courier_home, DEFAULT_BRANCH, HEAD_OFFICE_BRANCHES};
pub use loader::ConfigLoader;
pub use types::*;
