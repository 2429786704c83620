use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Implemented by every bounded value. `new` clamps, but values deserialized
/// from a config file arrive unchecked and must pass this before use.
pub trait Bounded {
    fn in_range(&self) -> bool;
}

/// A per-reference-frame movement speed constrained to [0.001, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct MovementSpeed(f32);

impl MovementSpeed {
    const MIN: f32 = 0.001;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl Bounded for MovementSpeed {
    fn in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

/// Radians of yaw per pixel of pointer motion, constrained to [0.0001, 0.1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct LookSensitivity(f32);

impl LookSensitivity {
    const MIN: f32 = 0.0001;
    const MAX: f32 = 0.1;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for LookSensitivity {
    fn default() -> Self {
        Self::new(0.002)
    }
}

impl Bounded for LookSensitivity {
    fn in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

/// A probability constrained to [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct Probability(f32);

impl Probability {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Probability {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Bounded for Probability {
    fn in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

/// A half-width in world units constrained to [0.0, 1000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct Extent(f32);

impl Extent {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1000.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(80.0)
    }
}

impl Bounded for Extent {
    fn in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

/// A frame count constrained to [1, 100000]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
pub struct DwellFrames(u32);

impl DwellFrames {
    const MIN: u32 = 1;
    const MAX: u32 = 100_000;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for DwellFrames {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Bounded for DwellFrames {
    fn in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_speed_clamping() {
        assert_eq!(MovementSpeed::new(-1.0).get(), 0.001);
        assert_eq!(MovementSpeed::new(0.1).get(), 0.1);
        assert_eq!(MovementSpeed::new(50.0).get(), 1.0);
    }

    #[test]
    fn test_probability_clamping() {
        assert_eq!(Probability::new(1.5).get(), 1.0);
        assert_eq!(Probability::new(-0.5).get(), 0.0);
        assert_eq!(Probability::default().get(), 0.5);
    }

    #[test]
    fn test_dwell_frames_never_zero() {
        assert_eq!(DwellFrames::new(0).get(), 1);
        assert_eq!(DwellFrames::default().get(), 100);
    }

    #[test]
    fn test_in_range_matches_clamp_bounds() {
        assert!(MovementSpeed::new(900.0).in_range());
        assert!(!MovementSpeed::from(-3.0).in_range());
        assert!(!MovementSpeed::from(900.0).in_range());
        assert!(!MovementSpeed::from(f32::NAN).in_range());
        assert!(!DwellFrames::from(0).in_range());
        assert!(DwellFrames::from(1).in_range());
        assert!(Probability::from(1.0).in_range());
        assert!(!Extent::from(-0.1).in_range());
    }

    #[test]
    fn test_range_types_deserialize_transparently() {
        #[derive(Deserialize)]
        struct Wrapper {
            speed: MovementSpeed,
            frames: DwellFrames,
        }

        let wrapper: Wrapper = toml::from_str("speed = 0.25\nframes = 30").unwrap();
        assert_eq!(wrapper.speed.get(), 0.25);
        assert_eq!(wrapper.frames.get(), 30);
    }
}
