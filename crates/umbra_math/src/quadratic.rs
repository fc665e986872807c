//! Closed-form quadratic root finding for ray/quadric intersection.

use crate::Interval;

/// Solve `a t² + b t + c = 0` for the ray parameter `t`.
///
/// Only the smaller root is ever considered: when the nearer root falls
/// outside `window` the result is `None`, even if the farther root would be
/// inside it. A degenerate leading coefficient (`a == 0`) never hits.
pub fn solve_quadratic(a: f64, b: f64, c: f64, window: Interval) -> Option<f64> {
    if a == 0.0 {
        return None;
    }

    let delta = b * b - 4.0 * a * c;
    if delta < 0.0 {
        return None;
    }

    let t = if delta == 0.0 {
        -b / (2.0 * a)
    } else {
        let sqrt_delta = delta.sqrt();
        let inv = 0.5 / a;
        let ta = (-b - sqrt_delta) * inv;
        let tb = (-b + sqrt_delta) * inv;
        ta.min(tb)
    };

    window.contains(t).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: Interval = Interval {
        min: -1e9,
        max: 1e9,
    };

    #[test]
    fn test_negative_discriminant_misses() {
        // t² + 1 = 0
        assert_eq!(solve_quadratic(1.0, 0.0, 1.0, WIDE), None);
    }

    #[test]
    fn test_double_root() {
        // (t - 2)² = t² - 4t + 4
        assert_eq!(solve_quadratic(1.0, -4.0, 4.0, WIDE), Some(2.0));
    }

    #[test]
    fn test_returns_smaller_root() {
        // (t - 1)(t - 3) = t² - 4t + 3
        let t = solve_quadratic(1.0, -4.0, 3.0, Interval::new(0.0, 10.0)).unwrap();
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_smaller_root_with_negative_a() {
        // -(t - 1)(t - 3) = -t² + 4t - 3
        let t = solve_quadratic(-1.0, 4.0, -3.0, Interval::new(0.0, 10.0)).unwrap();
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_smaller_root_outside_window_is_a_miss() {
        // Roots at -1 and 3; the far root is valid but is never tried.
        assert_eq!(solve_quadratic(1.0, -2.0, -3.0, Interval::new(0.0, 10.0)), None);
    }

    #[test]
    fn test_root_beyond_max_is_a_miss() {
        assert_eq!(solve_quadratic(1.0, -4.0, 3.0, Interval::new(0.0, 0.5)), None);
    }

    #[test]
    fn test_window_is_inclusive() {
        assert_eq!(solve_quadratic(1.0, -4.0, 3.0, Interval::new(1.0, 1.0)), Some(1.0));
    }

    #[test]
    fn test_degenerate_leading_coefficient() {
        assert_eq!(solve_quadratic(0.0, 2.0, -4.0, WIDE), None);
    }

    #[test]
    fn test_root_grid_stays_in_window() {
        let window = Interval::new(0.5, 4.0);
        for r1 in [-2.0, 0.0, 0.75, 1.0, 3.5, 5.0] {
            for r2 in [-1.0, 1.5, 2.0, 6.0] {
                let (a, b, c) = (2.0, -2.0 * (r1 + r2), 2.0 * r1 * r2);
                let smaller = f64::min(r1, r2);
                match solve_quadratic(a, b, c, window) {
                    Some(t) => {
                        assert!(window.contains(t));
                        assert!((t - smaller).abs() < 1e-9);
                    }
                    None => assert!(!window.contains(smaller)),
                }
            }
        }
    }
}
