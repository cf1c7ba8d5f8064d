pub mod batch_executor;
pub mod infrastructure;
pub mod pipeline_logger;
pub mod plan_segments_use_case;
