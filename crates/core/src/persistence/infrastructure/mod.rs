pub mod json_plan_store;
