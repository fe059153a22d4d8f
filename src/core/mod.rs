pub mod attendance;
pub mod clock;
pub mod config;
pub mod hours;
pub mod log;
pub mod staff;
