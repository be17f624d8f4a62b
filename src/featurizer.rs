//! Extraction of semantic features from pose snapshots.
//!
//! The [`Featurizer`] maps a [`Body`] snapshot (and optionally the previous one) to a set of
//! classified [`BodyFeatures`]. Extraction is deterministic and keeps no state; temporal state
//! lives in the [`pipeline`] module.
//!
//! [`pipeline`]: crate::pipeline

use itertools::Itertools;

use crate::features::{BodyFeatures, Feature, HandFeatures};
use crate::pose::{Body, Hand, Handedness};
use crate::vec::Vec3;

/// Direction words per axis, as `[negative, positive]`.
///
/// Worded from the tracked subject's perspective: `"left"` is the subject's left, and `"body"`
/// means pointing away from the camera, towards the subject.
pub const X_LABELS: [&str; 2] = ["left", "right"];
/// Direction words for the Y axis, as `[negative, positive]`.
pub const Y_LABELS: [&str; 2] = ["up", "down"];
/// Direction words for the Z axis, as `[negative, positive]`.
pub const Z_LABELS: [&str; 2] = ["front", "body"];

/// Tunable thresholds of the [`Featurizer`].
#[derive(Debug, Clone)]
pub struct FeaturizerConfig {
    /// Per-axis threshold a unit displacement component must exceed to produce a movement word.
    pub move_threshold: f32,
    /// Per-axis threshold a unit palm-normal component must exceed to produce an orientation
    /// word.
    pub orientation_threshold: f32,
    /// Minimum score a feature must carry to be kept; scoreless features always pass.
    pub confidence_threshold: f32,
}

impl Default for FeaturizerConfig {
    fn default() -> Self {
        Self {
            move_threshold: 0.30,
            orientation_threshold: 0.30,
            confidence_threshold: 0.15,
        }
    }
}

/// Extracts classified [`BodyFeatures`] from [`Body`] snapshots.
#[derive(Debug, Clone, Default)]
pub struct Featurizer {
    config: FeaturizerConfig,
}

impl Featurizer {
    /// Creates a featurizer with the given thresholds.
    pub fn new(config: FeaturizerConfig) -> Self {
        Self { config }
    }

    /// Returns the thresholds this featurizer classifies with.
    pub fn config(&self) -> &FeaturizerConfig {
        &self.config
    }

    /// Extracts features from `body`, using `last_body` (the previous frame's snapshot) for
    /// temporal features.
    ///
    /// Each hand is processed independently and only if present in `body`. Without `last_body`,
    /// or when the corresponding hand is absent from it, movement features are absent.
    pub fn extract_features(&self, body: &Body, last_body: Option<&Body>) -> BodyFeatures {
        let hand_features = |handedness| {
            body.hand(handedness).map(|hand| {
                self.extract_hand_features(hand, last_body.and_then(|last| last.hand(handedness)))
            })
        };

        BodyFeatures {
            left_hand: hand_features(Handedness::Left),
            right_hand: hand_features(Handedness::Right),
        }
    }

    fn extract_hand_features(&self, hand: &Hand, last_hand: Option<&Hand>) -> HandFeatures {
        HandFeatures {
            orientation: self.palm_orientation(hand),
            movement: self.hand_movement(hand, last_hand),
        }
    }

    /// Classifies the direction the palm is facing.
    ///
    /// The palm plane is anchored at the wrist and spanned by the vectors towards the index and
    /// pinky MCP joints; its normal is their cross product. Left and right hands are mirror
    /// images, so the operand order swaps with handedness to keep the normal's sign convention
    /// tied to the same physical palm-facing direction on both sides.
    fn palm_orientation(&self, hand: &Hand) -> Option<Feature> {
        let to_index = hand.index_finger.mcp - hand.wrist;
        let to_pinky = hand.pinky_finger.mcp - hand.wrist;

        let (b, c) = match hand.handedness {
            Handedness::Left => (to_pinky, to_index),
            Handedness::Right => (to_index, to_pinky),
        };

        // A collapsed palm plane (degenerate cross product) has no meaningful orientation.
        let normal = b.cross(c).try_normalize()?;
        let label = direction_label(normal, self.config.orientation_threshold);
        self.feature_if_confident(label, None)
    }

    /// Classifies the direction the hand moved in since the previous frame.
    ///
    /// The middle finger's MCP joint serves as the hand's reference point. Returns [`None`] when
    /// the hand was not tracked in the previous frame or did not move.
    fn hand_movement(&self, hand: &Hand, last_hand: Option<&Hand>) -> Option<Feature> {
        let last_hand = last_hand?;
        let displacement = (hand.middle_finger.mcp - last_hand.middle_finger.mcp).try_normalize()?;
        let label = direction_label(displacement, self.config.move_threshold);
        self.feature_if_confident(label, None)
    }

    /// Keeps a feature only when its score is absent or exceeds the confidence threshold.
    ///
    /// No collaborator produces per-feature scores yet, so today every feature passes; this is
    /// the hook a future score source plugs into.
    fn feature_if_confident(&self, value: String, score: Option<f32>) -> Option<Feature> {
        match score {
            Some(score) if score <= self.config.confidence_threshold => None,
            score => Some(Feature { value, score }),
        }
    }
}

/// Builds the composite direction label for a unit vector: one word per axis (possibly empty),
/// joined in x, y, z order by `_`.
fn direction_label(unit: Vec3, threshold: f32) -> String {
    [
        (unit.x, X_LABELS),
        (unit.y, Y_LABELS),
        (unit.z, Z_LABELS),
    ]
    .into_iter()
    .map(|(value, labels)| axis_word(value, labels, threshold))
    .join("_")
}

/// Picks the direction word for one axis. Comparisons are strict: a component exactly at the
/// threshold yields the empty word.
fn axis_word(value: f32, [negative, positive]: [&'static str; 2], threshold: f32) -> &'static str {
    if value > threshold {
        positive
    } else if value < -threshold {
        negative
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use crate::pose::{LandmarkIdx, NUM_HAND_LANDMARKS};
    use crate::vec::vec3;

    use super::*;

    /// Builds a hand with the wrist and MCP joints at the given positions; all other landmarks
    /// sit at the origin.
    fn hand(
        handedness: Handedness,
        wrist: [f32; 3],
        index_mcp: [f32; 3],
        pinky_mcp: [f32; 3],
        middle_mcp: [f32; 3],
    ) -> Hand {
        let mut positions = [[0.0; 3]; NUM_HAND_LANDMARKS];
        positions[LandmarkIdx::Wrist as usize] = wrist;
        positions[LandmarkIdx::IndexFingerMcp as usize] = index_mcp;
        positions[LandmarkIdx::PinkyMcp as usize] = pinky_mcp;
        positions[LandmarkIdx::MiddleFingerMcp as usize] = middle_mcp;
        Hand::from_positions(handedness, &positions)
    }

    fn right_hand_at(middle_mcp: [f32; 3]) -> Hand {
        hand(
            Handedness::Right,
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            middle_mcp,
        )
    }

    #[test]
    fn axis_word_threshold_is_strict() {
        assert_eq!(axis_word(0.30, X_LABELS, 0.30), "");
        assert_eq!(axis_word(-0.30, X_LABELS, 0.30), "");
        assert_eq!(axis_word(0.31, X_LABELS, 0.30), "right");
        assert_eq!(axis_word(-0.31, X_LABELS, 0.30), "left");
    }

    #[test]
    fn direction_label_joins_axes_in_order() {
        assert_eq!(direction_label(vec3(1.0, 0.0, 0.0), 0.30), "right__");
        assert_eq!(direction_label(vec3(0.0, -1.0, 0.0), 0.30), "_up_");
        assert_eq!(direction_label(vec3(0.0, 0.0, 1.0), 0.30), "__body");
        assert_eq!(direction_label(vec3(0.6, 0.6, 0.0), 0.30), "right_down_");
        assert_eq!(direction_label(vec3(0.1, 0.1, 0.1), 0.30), "__");
    }

    #[test]
    fn right_palm_facing_body() {
        // Wrist at the origin, index MCP on +X, pinky MCP on +Y: the right hand's palm plane
        // normal is +Z, which classifies as facing the subject's body.
        let body = Body::new(None, Some(right_hand_at([0.0; 3])));
        let features = Featurizer::default().extract_features(&body, None);

        let orientation = features.right_hand.unwrap().orientation.unwrap();
        assert_eq!(orientation.value, "__body");
    }

    #[test]
    fn chirality_swap_flips_orientation() {
        // Identical wrist/index/pinky geometry, only the handedness flag differs: the classified
        // normal must flip sign.
        let geometry = |handedness| {
            hand(
                handedness,
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0],
            )
        };
        let featurizer = Featurizer::default();

        let right = Body::new(None, Some(geometry(Handedness::Right)));
        let left = Body::new(Some(geometry(Handedness::Left)), None);

        let right_orientation = featurizer
            .extract_features(&right, None)
            .right_hand
            .unwrap()
            .orientation
            .unwrap();
        let left_orientation = featurizer
            .extract_features(&left, None)
            .left_hand
            .unwrap()
            .orientation
            .unwrap();

        assert_eq!(right_orientation.value, "__body");
        assert_eq!(left_orientation.value, "__front");
    }

    #[test]
    fn degenerate_palm_plane_has_no_orientation() {
        // All joints at the origin: the cross product is the zero vector.
        let degenerate = hand(Handedness::Right, [0.0; 3], [0.0; 3], [0.0; 3], [0.0; 3]);
        let body = Body::new(None, Some(degenerate));
        let features = Featurizer::default().extract_features(&body, None);
        assert_eq!(features.right_hand.unwrap().orientation, None);
    }

    #[test]
    fn movement_requires_previous_hand() {
        let featurizer = Featurizer::default();
        let current = Body::new(None, Some(right_hand_at([0.5, 0.0, 0.0])));

        // No previous body at all.
        let features = featurizer.extract_features(&current, None);
        assert_eq!(features.right_hand.as_ref().unwrap().movement, None);

        // Previous body tracked only the other hand.
        let left_only = Body::new(
            Some(hand(
                Handedness::Left,
                [0.0; 3],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0; 3],
            )),
            None,
        );
        let features = featurizer.extract_features(&current, Some(&left_only));
        assert_eq!(features.right_hand.unwrap().movement, None);
    }

    #[test]
    fn movement_classifies_displacement_direction() {
        let featurizer = Featurizer::default();
        let last = Body::new(None, Some(right_hand_at([0.0, 0.0, 0.0])));
        let current = Body::new(None, Some(right_hand_at([0.5, 0.0, 0.0])));

        let features = featurizer.extract_features(&current, Some(&last));
        let movement = features.right_hand.unwrap().movement.unwrap();
        assert_eq!(movement.value, "right__");
    }

    #[test]
    fn stationary_hand_has_no_movement() {
        let featurizer = Featurizer::default();
        let last = Body::new(None, Some(right_hand_at([0.2, 0.2, 0.2])));
        let current = Body::new(None, Some(right_hand_at([0.2, 0.2, 0.2])));

        let features = featurizer.extract_features(&current, Some(&last));
        assert_eq!(features.right_hand.unwrap().movement, None);
    }

    #[test]
    fn empty_body_yields_empty_features() {
        let body = Body::new(None, None);
        let features = Featurizer::default().extract_features(&body, None);
        assert_eq!(features, BodyFeatures::default());
    }

    #[test]
    fn confidence_gate_filters_scored_features_only() {
        let featurizer = Featurizer::default();
        assert!(featurizer
            .feature_if_confident("x".into(), None)
            .is_some());
        assert!(featurizer
            .feature_if_confident("x".into(), Some(0.5))
            .is_some());
        assert!(featurizer
            .feature_if_confident("x".into(), Some(0.15))
            .is_none());
        assert!(featurizer
            .feature_if_confident("x".into(), Some(0.01))
            .is_none());
    }
}
