/// An utterance interval whose score met the threshold.
///
/// Only lives inside a single planning run; merged intervals reuse the same
/// shape with the widened bounds and the best contributing score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredHit {
    pub t0: f64,
    pub t1: f64,
    pub score: f64,
}

impl ScoredHit {
    pub fn duration(&self) -> f64 {
        self.t1 - self.t0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_duration() {
        let h = ScoredHit {
            t0: 10.0,
            t1: 14.5,
            score: 0.9,
        };
        assert_relative_eq!(h.duration(), 4.5);
    }

    #[test]
    fn test_inverted_interval_has_negative_duration() {
        let h = ScoredHit {
            t0: 10.0,
            t1: 9.0,
            score: 0.9,
        };
        assert!(h.duration() < 0.0);
    }
}
