pub mod persistence;
pub mod pipeline;
pub mod planning;
pub mod scoring;
pub mod shared;
pub mod transcript;
pub mod video;
