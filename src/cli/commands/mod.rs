pub mod clock;
pub mod config;
pub mod export;
pub mod hours;
pub mod init;
pub mod list;
pub mod log;
pub mod staff;
