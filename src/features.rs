//! Output value types of the featurization engine.

use crate::pose::Handedness;

/// A single classified feature: a direction label plus an optional confidence score.
///
/// No score source is wired up yet, so `score` is currently always [`None`]; it exists so that a
/// future estimator that reports per-feature confidence can populate it without an API change.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub value: String,
    pub score: Option<f32>,
}

impl Feature {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            score: None,
        }
    }
}

/// The features extracted from a single tracked hand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandFeatures {
    /// Classified direction of the palm-facing normal vector.
    pub orientation: Option<Feature>,
    /// Classified direction of frame-to-frame hand displacement.
    ///
    /// Absent on the first frame a hand appears, since there is no previous position to compare
    /// against.
    pub movement: Option<Feature>,
}

/// The features extracted from one [`Body`] snapshot.
///
/// [`Body`]: crate::pose::Body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyFeatures {
    pub left_hand: Option<HandFeatures>,
    pub right_hand: Option<HandFeatures>,
}

impl BodyFeatures {
    /// Returns the features of the hand with the given [`Handedness`], if that hand was tracked.
    pub fn hand(&self, handedness: Handedness) -> Option<&HandFeatures> {
        match handedness {
            Handedness::Left => self.left_hand.as_ref(),
            Handedness::Right => self.right_hand.as_ref(),
        }
    }
}
