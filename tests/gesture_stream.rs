//! End-to-end pipeline test: a scripted landmark stream flowing through featurization and a
//! stub inference stage.

use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use mudra::features::BodyFeatures;
use mudra::pipeline::{Inferencer, Pipeline, PoseEstimator};
use mudra::pose::{Body, Hand, Handedness, LandmarkIdx, NUM_HAND_LANDMARKS};

/// A right hand with a fixed palm plane (+Z normal), translated by `offset`.
fn right_hand(offset: [f32; 3]) -> Hand {
    let mut positions = [[0.0; 3]; NUM_HAND_LANDMARKS];
    positions[LandmarkIdx::Wrist as usize] = offset;
    positions[LandmarkIdx::IndexFingerMcp as usize] =
        [offset[0] + 1.0, offset[1], offset[2]];
    positions[LandmarkIdx::PinkyMcp as usize] = [offset[0], offset[1] + 1.0, offset[2]];
    positions[LandmarkIdx::MiddleFingerMcp as usize] =
        [offset[0] + 0.5, offset[1] + 0.5, offset[2]];
    Hand::from_positions(Handedness::Right, &positions)
}

struct ScriptedEstimator {
    bodies: VecDeque<Body>,
    frames_seen: u32,
}

impl PoseEstimator for ScriptedEstimator {
    type Frame = ();
    type Raw = u32;

    fn estimate(&mut self, _frame: &()) -> Result<(Body, u32)> {
        self.frames_seen += 1;
        let body = self
            .bodies
            .pop_front()
            .ok_or_else(|| anyhow!("stream exhausted"))?;
        Ok((body, self.frames_seen))
    }
}

/// Echoes the orientation label of the right hand, numbering its invocations.
struct EchoInferencer {
    calls: u32,
}

impl Inferencer for EchoInferencer {
    fn infer(&mut self, features: &BodyFeatures) -> Result<String> {
        self.calls += 1;
        let orientation = features
            .hand(Handedness::Right)
            .and_then(|hand| hand.orientation.as_ref())
            .map_or("-", |f| f.value.as_str());
        Ok(format!("#{} {}", self.calls, orientation))
    }
}

#[test]
fn scripted_stream_produces_ordered_features() {
    mudra::init_logger!();

    let estimator = ScriptedEstimator {
        bodies: [
            // Hand appears.
            Body::new(None, Some(right_hand([0.0, 0.0, 0.0]))),
            // Hand moves to the subject's right.
            Body::new(None, Some(right_hand([0.5, 0.0, 0.0]))),
            // Hand disappears for a frame.
            Body::new(None, None),
            // Hand reappears; movement restarts from scratch because the previous snapshot
            // contains no right hand.
            Body::new(None, Some(right_hand([0.5, 0.0, 0.0]))),
        ]
        .into(),
        frames_seen: 0,
    };

    let mut pipeline = Pipeline::new(estimator);
    pipeline.set_inferencer(Box::new(EchoInferencer { calls: 0 }));
    pipeline.initialize().unwrap();

    let first = pipeline.process_frame(&()).unwrap();
    let hand = first.features.right_hand.as_ref().unwrap();
    assert_eq!(hand.orientation.as_ref().unwrap().value, "__body");
    assert_eq!(hand.movement, None);
    assert_eq!(first.inference.as_deref(), Some("#1 __body"));
    assert_eq!(first.raw, 1);

    let second = pipeline.process_frame(&()).unwrap();
    let hand = second.features.right_hand.as_ref().unwrap();
    assert_eq!(hand.movement.as_ref().unwrap().value, "right__");
    assert_eq!(second.inference.as_deref(), Some("#2 __body"));
    assert_eq!(second.raw, 2);

    let third = pipeline.process_frame(&()).unwrap();
    assert!(third.features.right_hand.is_none());
    assert_eq!(third.inference.as_deref(), Some("#3 -"));
    // The empty snapshot still superseded the previous body.
    assert!(pipeline.state().is_tracking());

    let fourth = pipeline.process_frame(&()).unwrap();
    let hand = fourth.features.right_hand.as_ref().unwrap();
    assert_eq!(hand.orientation.as_ref().unwrap().value, "__body");
    assert_eq!(hand.movement, None);
    assert_eq!(fourth.raw, 4);
}
