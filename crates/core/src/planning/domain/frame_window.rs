use serde::{Deserialize, Serialize};

/// The slice of a segment that frame sampling needs: an id and its bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameWindow {
    pub id: String,
    pub t0: f64,
    pub t1: f64,
}

impl FrameWindow {
    pub fn duration(&self) -> f64 {
        (self.t1 - self.t0).max(0.0)
    }

    /// Number of samples at `fps` starting at `t0` and strictly before `t1`.
    pub fn frame_count(&self, fps: f64) -> usize {
        if fps <= 0.0 || !fps.is_finite() {
            return 0;
        }
        (self.duration() * fps).ceil() as usize
    }

    /// Timestamps a sampler at `fps` would grab, in order.
    pub fn sample_times(&self, fps: f64) -> Vec<f64> {
        (0..self.frame_count(fps))
            .map(|i| self.t0 + i as f64 / fps)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn window(t0: f64, t1: f64) -> FrameWindow {
        FrameWindow {
            id: "seg_0001".to_string(),
            t0,
            t1,
        }
    }

    #[rstest]
    #[case::half_fps(0.0, 12.0, 0.5, 6)]
    #[case::partial_interval(10.0, 13.0, 0.5, 2)]
    #[case::one_fps(100.0, 104.5, 1.0, 5)]
    #[case::empty_window(5.0, 5.0, 1.0, 0)]
    #[case::inverted_window(5.0, 4.0, 1.0, 0)]
    #[case::zero_fps(0.0, 10.0, 0.0, 0)]
    fn test_frame_count(
        #[case] t0: f64,
        #[case] t1: f64,
        #[case] fps: f64,
        #[case] expected: usize,
    ) {
        assert_eq!(window(t0, t1).frame_count(fps), expected);
    }

    #[test]
    fn test_sample_times() {
        let times = window(6.0, 12.0).sample_times(0.5);
        assert_eq!(times.len(), 3);
        assert_relative_eq!(times[0], 6.0);
        assert_relative_eq!(times[1], 8.0);
        assert_relative_eq!(times[2], 10.0);
    }

    #[test]
    fn test_sample_times_zero_fps_empty() {
        assert!(window(0.0, 10.0).sample_times(0.0).is_empty());
    }
}
