// ============================================================================
// EASING CURVES for trail tweens
// ============================================================================

/// Easing curve applied to a tween's normalized progress
///
/// Every curve maps 0 to 0 and 1 to 1 and never runs backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Very fast start, long tail. The image "chases" the cursor.
    ExpoOut,
    /// Gentle deceleration (quadratic), used for fades
    Power1Out,
    /// Slow start, used for the squash before a drop
    QuadIn,
    /// Strong deceleration
    QuintOut,
    /// S-curve over five powers
    QuintInOut,
}

impl Ease {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::ExpoOut => ease_out_expo(t),
            Ease::Power1Out => ease_out_quad(t),
            Ease::QuadIn => t * t,
            Ease::QuintOut => ease_out_quint(t),
            Ease::QuintInOut => ease_in_out_quint(t),
        }
    }
}

/// Ease-out exponential: `1 - 2^(-10t)`, snapped to exactly 1 at the end
fn ease_out_expo(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

/// Ease-out quadratic: fast at start, decelerates
fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

fn ease_out_quint(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(5)
}

fn ease_in_out_quint(t: f32) -> f32 {
    if t < 0.5 {
        16.0 * t.powi(5)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::ExpoOut,
        Ease::Power1Out,
        Ease::QuadIn,
        Ease::QuintOut,
        Ease::QuintInOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-6, "{:?} at t=0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at t=1", ease);
        }
    }

    #[test]
    fn test_easing_clamps_input() {
        for ease in ALL {
            assert_eq!(ease.apply(-3.0), ease.apply(0.0), "{:?} below range", ease);
            assert_eq!(ease.apply(7.5), ease.apply(1.0), "{:?} above range", ease);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for ease in ALL {
            let mut prev = ease.apply(0.0);
            for i in 1..=200 {
                let value = ease.apply(i as f32 / 200.0);
                assert!(
                    value >= prev - 1e-6,
                    "{:?} decreased at step {}: {} -> {}",
                    ease,
                    i,
                    prev,
                    value
                );
                prev = value;
            }
        }
    }

    #[test]
    fn test_expo_out_front_loaded() {
        // Most of the distance is covered in the first fifth
        assert!(Ease::ExpoOut.apply(0.2) > 0.7);
        assert!(Ease::QuadIn.apply(0.2) < 0.05);
    }
}
