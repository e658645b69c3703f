pub mod capture {
    pub mod domain {
        pub mod frame_source;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod object_detector;
        pub mod target_selector;
    }
    pub mod infrastructure;
}

pub mod gate {
    pub mod domain {
        pub mod admission_gate;
    }
}

pub mod motion {
    pub mod domain {
        pub mod magnitude;
        pub mod motion_config;
        pub mod motion_tracker;
        pub mod smoothing_filter;
    }
}

pub mod pipeline {
    pub mod infrastructure;
    pub mod pipeline_error;
    pub mod pipeline_executor;
    pub mod pipeline_logger;
    pub mod track_target_use_case;
}

pub mod render {
    pub mod domain {
        pub mod motion_sink;
    }
    pub mod infrastructure;
}

pub mod shared {
    pub mod bounding_box;
    pub mod constants;
    pub mod frame;
}
