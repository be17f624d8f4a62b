//! The per-frame orchestration loop.
//!
//! A [`Pipeline`] owns the external collaborators (a [`PoseEstimator`] and optionally an
//! [`Inferencer`]) and threads the previous frame's [`Body`] snapshot through the
//! [`Featurizer`]. The temporal state itself lives in [`TrackingState`], whose pure
//! [`step`][TrackingState::step] function makes the frame-to-frame transition testable without
//! hidden mutation.
//!
//! Frame processing is inherently sequential: frame N's movement features depend on frame N-1's
//! snapshot. [`Pipeline::process_frame`] takes `&mut self`, so pipeline runs cannot overlap;
//! callers must submit frames one at a time, in capture order.

use std::mem;

use anyhow::Result;

use crate::features::{BodyFeatures, Feature};
use crate::featurizer::Featurizer;
use crate::pose::Body;
use crate::timer::{FpsCounter, Timer};

/// The perception adapter: turns a raw camera frame into a parsed [`Body`] snapshot.
///
/// Implementations wrap a pretrained landmark estimation model. The core is agnostic to the
/// adapter's internal landmark format as long as it maps into the pose data model (see
/// [`Hand::from_positions`][crate::pose::Hand::from_positions]).
pub trait PoseEstimator {
    /// The camera frame type this estimator consumes.
    type Frame;
    /// The estimator's raw, unparsed output. Forwarded untouched in [`FrameOutput`] for
    /// consumers that want to render or debug it.
    type Raw;

    /// Prepares the estimator for frame processing (loading models, opening sessions).
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Estimates hand landmarks for one frame, blocking until the result is available.
    fn estimate(&mut self, frame: &Self::Frame) -> Result<(Body, Self::Raw)>;
}

/// The inference stage: consumes extracted features and produces a classification string.
pub trait Inferencer {
    /// Prepares the inference session.
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Runs inference on the features of one frame, blocking until the result is available.
    fn infer(&mut self, features: &BodyFeatures) -> Result<String>;
}

/// Temporal state threaded through the pipeline: the most recently completed [`Body`] snapshot.
///
/// The state starts out *idle* (no previous body) and becomes *tracking* with the first
/// processed snapshot. It never returns to idle: a snapshot with both hands absent still
/// supersedes the previous one, it just produces no per-hand features.
#[derive(Debug, Clone, Default)]
pub struct TrackingState {
    last_body: Option<Body>,
}

impl TrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a previous snapshot is available for temporal features.
    pub fn is_tracking(&self) -> bool {
        self.last_body.is_some()
    }

    /// The most recently completed snapshot.
    pub fn last_body(&self) -> Option<&Body> {
        self.last_body.as_ref()
    }

    /// Advances the state by one frame: extracts features from `body` against the previous
    /// snapshot, then makes `body` the new previous snapshot.
    ///
    /// Pure except for the feature extraction itself being deterministic; the caller receives
    /// the successor state instead of this method mutating anything in place.
    pub fn step(self, featurizer: &Featurizer, body: Body) -> (Self, BodyFeatures) {
        let features = featurizer.extract_features(&body, self.last_body.as_ref());
        (
            Self {
                last_body: Some(body),
            },
            features,
        )
    }
}

/// Everything a completed pipeline run produced for one frame.
pub struct FrameOutput<R> {
    /// The extracted geometric features.
    pub features: BodyFeatures,
    /// The inference result, if an [`Inferencer`] is attached and succeeded for this frame.
    pub inference: Option<String>,
    /// The perception adapter's raw output for this frame.
    pub raw: R,
}

/// Stateful per-frame orchestration: estimator → featurizer → (optional) inferencer.
pub struct Pipeline<P: PoseEstimator> {
    estimator: P,
    inferencer: Option<Box<dyn Inferencer>>,
    featurizer: Featurizer,
    state: TrackingState,
    t_estimate: Timer,
    t_featurize: Timer,
    t_infer: Timer,
    fps: FpsCounter,
}

impl<P: PoseEstimator> Pipeline<P> {
    /// Creates a pipeline around a perception adapter, with default featurizer thresholds and
    /// no inference stage.
    pub fn new(estimator: P) -> Self {
        Self {
            estimator,
            inferencer: None,
            featurizer: Featurizer::default(),
            state: TrackingState::new(),
            t_estimate: Timer::new("estimate"),
            t_featurize: Timer::new("featurize"),
            t_infer: Timer::new("infer"),
            fps: FpsCounter::new("pipeline"),
        }
    }

    /// Replaces the featurizer (and with it the classification thresholds).
    pub fn set_featurizer(&mut self, featurizer: Featurizer) {
        self.featurizer = featurizer;
    }

    /// Attaches an inference stage that is invoked with each frame's features.
    pub fn set_inferencer(&mut self, inferencer: Box<dyn Inferencer>) {
        self.inferencer = Some(inferencer);
    }

    /// Returns the current tracking state.
    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    /// Returns profiling timers for the pipeline stages.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> + '_ {
        [&self.t_estimate, &self.t_featurize, &self.t_infer].into_iter()
    }

    /// Prepares all attached collaborators. Must complete before frame processing begins; any
    /// failure here means the pipeline cannot start.
    pub fn initialize(&mut self) -> Result<()> {
        self.estimator.initialize()?;
        if let Some(inferencer) = &mut self.inferencer {
            inferencer.initialize()?;
        }
        Ok(())
    }

    /// Runs the full pipeline on one frame and returns its output.
    ///
    /// The previous-snapshot state is updated on every successfully estimated frame, even when
    /// the inference stage fails; an inference failure is logged and reflected as
    /// `inference: None` in the output, while the geometric features are still returned.
    pub fn process_frame(&mut self, frame: &P::Frame) -> Result<FrameOutput<P::Raw>> {
        let (body, raw) = self.t_estimate.time(|| self.estimator.estimate(frame))?;

        let state = mem::take(&mut self.state);
        let (state, features) = self.t_featurize.time(|| state.step(&self.featurizer, body));
        self.state = state;

        let inference = match &mut self.inferencer {
            Some(inferencer) => match self.t_infer.time(|| inferencer.infer(&features)) {
                Ok(result) => Some(result),
                Err(e) => {
                    log::warn!("inference failed, emitting geometric features only: {e:#}");
                    None
                }
            },
            None => None,
        };

        log_features(&features, inference.as_deref());
        self.fps
            .tick_with([&self.t_estimate, &self.t_featurize, &self.t_infer]);

        Ok(FrameOutput {
            features,
            inference,
            raw,
        })
    }
}

fn log_features(features: &BodyFeatures, inference: Option<&str>) {
    fn label(feature: &Option<Feature>) -> &str {
        feature.as_ref().map_or("-", |f| f.value.as_str())
    }

    let empty = Default::default();
    let left = features.left_hand.as_ref().unwrap_or(&empty);
    let right = features.right_hand.as_ref().unwrap_or(&empty);
    log::debug!(
        "orientation: L '{}' R '{}' / movement: L '{}' R '{}'",
        label(&left.orientation),
        label(&right.orientation),
        label(&left.movement),
        label(&right.movement),
    );
    if let Some(result) = inference {
        log::debug!("inferred: '{:.100}'", result);
    }
}
