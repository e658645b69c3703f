pub mod json_lines_motion_sink;
pub mod log_motion_sink;
