pub mod command;
pub mod protocol;
