//! Volume level
//!
//! Linear level in [0, 1], the range the media output accepts directly.

/// Clamped volume level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    level: f32,
}

impl Volume {
    /// Create a volume, clamping into [0, 1]. NaN becomes full volume.
    pub fn new(level: f32) -> Self {
        let mut volume = Self::default();
        volume.set_level(level);
        volume
    }

    /// Set volume level, clamping into [0, 1]
    ///
    /// NaN is ignored. Returns whether the stored level changed.
    pub fn set_level(&mut self, level: f32) -> bool {
        if level.is_nan() {
            return false;
        }
        let clamped = level.clamp(0.0, 1.0);
        if clamped == self.level {
            return false;
        }
        self.level = clamped;
        true
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self { level: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range() {
        assert!((Volume::new(1.7).level() - 1.0).abs() < f32::EPSILON);
        assert_eq!(Volume::new(-0.3).level(), 0.0);
        assert!((Volume::new(f32::INFINITY).level() - 1.0).abs() < f32::EPSILON);
        assert_eq!(Volume::new(f32::NEG_INFINITY).level(), 0.0);
    }

    #[test]
    fn nan_is_ignored() {
        let mut volume = Volume::new(0.4);
        assert!(!volume.set_level(f32::NAN));
        assert!((volume.level() - 0.4).abs() < f32::EPSILON);
        assert!((Volume::new(f32::NAN).level() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reports_change() {
        let mut volume = Volume::default();
        assert!(!volume.set_level(1.0));
        assert!(!volume.set_level(3.0));
        assert!(volume.set_level(0.5));
        assert_eq!(volume.level(), 0.5);
    }
}
