/// A closed range of ray parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive test, used for accepting intersection roots.
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Exclusive test, used for shadow occluders.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Same interval with a new upper bound.
    pub fn with_max(&self, max: f64) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_vs_surrounds_at_bounds() {
        let window = Interval::new(0.5, 8.0);
        for t in [0.5, 8.0] {
            assert!(window.contains(t));
            assert!(!window.surrounds(t));
        }
        assert!(window.contains(3.0) && window.surrounds(3.0));
        for t in [0.49, 8.01, f64::NAN] {
            assert!(!window.contains(t));
            assert!(!window.surrounds(t));
        }
    }

    #[test]
    fn test_interval_with_max() {
        let narrowed = Interval::new(1.0, 10.0).with_max(4.0);
        assert_eq!(narrowed, Interval::new(1.0, 4.0));
    }
}
