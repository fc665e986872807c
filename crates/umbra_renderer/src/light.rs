//! Point light and distance attenuation.

use std::fmt;
use std::str::FromStr;

use umbra_math::DVec3;

/// A point light. Intensity comes only from the attenuation model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: DVec3,
}

impl Light {
    pub fn new(position: DVec3) -> Self {
        Self { position }
    }

    /// Unnormalized vector from `hit` to the light.
    #[inline]
    pub fn vector_to(&self, hit: DVec3) -> DVec3 {
        self.position - hit
    }
}

/// How light intensity falls off with distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightModel {
    /// Full intensity at any distance
    None,
    /// `1 - d / max` clamped at zero
    #[default]
    Linear,
    /// `(1 - d / max)²` clamped at zero
    Quadratic,
}

impl LightModel {
    /// Intensity scale in [0, 1] for a light `distance` away.
    pub fn attenuation(self, distance: f64, max_distance: f64) -> f64 {
        let falloff = || {
            if max_distance <= 0.0 {
                0.0
            } else {
                (1.0 - distance / max_distance).max(0.0)
            }
        };

        match self {
            LightModel::None => 1.0,
            LightModel::Linear => falloff(),
            LightModel::Quadratic => {
                let f = falloff();
                f * f
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LightModel::None => "none",
            LightModel::Linear => "linear",
            LightModel::Quadratic => "quadratic",
        }
    }
}

impl fmt::Display for LightModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LightModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(LightModel::None),
            "linear" => Ok(LightModel::Linear),
            "quadratic" => Ok(LightModel::Quadratic),
            other => Err(format!(
                "unknown light model '{}', expected none, linear or quadratic",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODELS: [LightModel; 3] = [LightModel::None, LightModel::Linear, LightModel::Quadratic];

    #[test]
    fn test_vector_to_light() {
        let light = Light::new(DVec3::new(0.0, 10.0, 0.0));
        assert_eq!(light.vector_to(DVec3::new(1.0, 2.0, 3.0)), DVec3::new(-1.0, 8.0, -3.0));
    }

    #[test]
    fn test_full_intensity_at_light() {
        for model in MODELS {
            assert_eq!(model.attenuation(0.0, 50.0), 1.0, "{}", model);
        }
    }

    #[test]
    fn test_zero_at_and_beyond_max_distance() {
        for model in [LightModel::Linear, LightModel::Quadratic] {
            assert_eq!(model.attenuation(50.0, 50.0), 0.0);
            assert_eq!(model.attenuation(75.0, 50.0), 0.0);
            assert_eq!(model.attenuation(1e9, 50.0), 0.0);
        }
    }

    #[test]
    fn test_none_ignores_distance() {
        for d in [0.0, 1.0, 100.0, 1e9] {
            assert_eq!(LightModel::None.attenuation(d, 10.0), 1.0);
        }
    }

    #[test]
    fn test_falloff_shapes() {
        assert!((LightModel::Linear.attenuation(25.0, 100.0) - 0.75).abs() < 1e-12);
        assert!((LightModel::Quadratic.attenuation(25.0, 100.0) - 0.5625).abs() < 1e-12);

        let mut previous = 1.0;
        for d in [10.0, 20.0, 40.0, 80.0] {
            let a = LightModel::Quadratic.attenuation(d, 100.0);
            assert!(a < previous);
            previous = a;
        }
    }

    #[test]
    fn test_non_positive_max_distance() {
        assert_eq!(LightModel::Linear.attenuation(0.0, 0.0), 0.0);
        assert_eq!(LightModel::Quadratic.attenuation(1.0, -5.0), 0.0);
        assert_eq!(LightModel::None.attenuation(1.0, -5.0), 1.0);
    }

    #[test]
    fn test_parse_light_model() {
        for model in MODELS {
            assert_eq!(model.to_string().parse::<LightModel>(), Ok(model));
        }
        assert_eq!("Quadratic".parse::<LightModel>(), Ok(LightModel::Quadratic));
        assert!("cubic".parse::<LightModel>().is_err());
        assert_eq!(LightModel::default(), LightModel::Linear);
    }
}
