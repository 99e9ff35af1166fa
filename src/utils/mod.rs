pub mod git;
pub mod path;
pub mod process;
