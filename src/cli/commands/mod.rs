mod command_result;
pub mod extract;
mod helper;
pub mod init;
pub mod rewrite;

pub use command_result::*;
