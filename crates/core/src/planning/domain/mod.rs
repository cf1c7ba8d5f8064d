pub mod frame_window;
pub mod plan_params;
pub mod scored_hit;
pub mod segment;
pub mod segment_plan;
pub mod segment_planner;
