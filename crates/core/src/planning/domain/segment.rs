use serde::{Deserialize, Serialize};

use super::frame_window::FrameWindow;

/// A padded, clamped time window believed to show code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub t0: f64,
    pub t1: f64,
    pub score: f64,
    pub reason: String,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.t1 - self.t0
    }

    pub fn frame_window(&self) -> FrameWindow {
        FrameWindow {
            id: self.id.clone(),
            t0: self.t0,
            t1: self.t1,
        }
    }
}
