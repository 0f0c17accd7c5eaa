/// Configuration for a circuit
///
/// Holds the geometric tolerances the editing operations depend on.

/// Displacement applied in both axes when a gate is duplicated
pub const DEFAULT_CLONE_OFFSET: i32 = 10;

/// Distance within which a point counts as being on a pin
pub const DEFAULT_PIN_HIT_RADIUS: i32 = 8;

/// Configuration for circuit editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitConfig {
    /// Offset of a clone from its original, applied to both x and y
    pub clone_offset: i32,
    /// Radius used by pin hit-testing
    pub pin_hit_radius: i32,
}

impl CircuitConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            clone_offset: DEFAULT_CLONE_OFFSET,
            pin_hit_radius: DEFAULT_PIN_HIT_RADIUS,
        }
    }

    /// Set the clone offset
    ///
    /// # Arguments
    /// * `offset` - Displacement in both axes for duplicated gates
    pub fn with_clone_offset(mut self, offset: i32) -> Self {
        self.clone_offset = offset;
        self
    }

    /// Set the pin hit radius
    ///
    /// # Note
    /// Negative radii are clamped to zero, which only matches the exact pin position
    pub fn with_pin_hit_radius(mut self, radius: i32) -> Self {
        self.pin_hit_radius = radius.max(0);
        self
    }
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CircuitConfig::default();
        assert_eq!(config.clone_offset, 10);
        assert_eq!(config.pin_hit_radius, DEFAULT_PIN_HIT_RADIUS);
    }

    #[test]
    fn test_config_builder() {
        let config = CircuitConfig::new()
            .with_clone_offset(25)
            .with_pin_hit_radius(3);

        assert_eq!(config.clone_offset, 25);
        assert_eq!(config.pin_hit_radius, 3);
    }

    #[test]
    fn test_negative_radius_is_clamped() {
        let config = CircuitConfig::new().with_pin_hit_radius(-4);
        assert_eq!(config.pin_hit_radius, 0);
    }
}
