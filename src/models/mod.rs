pub mod attendance;
pub mod row_target;
