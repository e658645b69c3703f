pub mod paced_frame_source;
