#[macro_use]
extern crate log;

pub mod logger;

pub mod dirs;
pub mod time_report;
