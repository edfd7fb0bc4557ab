mod commands;
mod worker;

pub use commands::FetchCommand;
pub use worker::spawn;
