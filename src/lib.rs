//! Mudra hand pose featurization library.
//!
//! Mudra turns streams of 3D hand-landmark snapshots into human-readable semantic descriptors
//! (palm orientation, hand movement direction) that a downstream gesture or sign-language
//! recognizer can consume.
//!
//! # 3D Coordinates
//!
//! Landmark coordinates are camera-relative, but direction *labels* are worded from the tracked
//! subject's perspective: X points to the subject's right, Y points down, Z points from the
//! camera towards the subject's body. A palm normal of `(0, 0, 1)` therefore classifies as
//! `"body"` (palm facing the subject), not as "camera".
//!
//! # Pipeline
//!
//! The usual flow is: an external landmark estimator (implementing [`PoseEstimator`]) produces a
//! [`Body`] snapshot per frame, the [`Pipeline`] threads the previous snapshot through the
//! [`Featurizer`], and the resulting [`BodyFeatures`] are returned to the caller (and optionally
//! forwarded to an [`Inferencer`]).
//!
//! [`PoseEstimator`]: pipeline::PoseEstimator
//! [`Body`]: pose::Body
//! [`Pipeline`]: pipeline::Pipeline
//! [`Featurizer`]: featurizer::Featurizer
//! [`BodyFeatures`]: features::BodyFeatures
//! [`Inferencer`]: pipeline::Inferencer

use log::LevelFilter;

pub mod features;
pub mod featurizer;
pub mod pipeline;
pub mod pose;
pub mod timer;
pub mod vec;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and Mudra will log at *debug* level; everything else follows `RUST_LOG`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
