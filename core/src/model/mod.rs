pub mod activity;
pub mod attendance;
pub mod report;
