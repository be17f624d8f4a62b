//! The hand/body pose data model.
//!
//! A [`Body`] is an immutable snapshot of everything the perception adapter tracked in one frame:
//! up to two [`Hand`]s, each a set of named [`Landmark`]s, plus a capture timestamp. Snapshots
//! are never mutated, only superseded by the next frame's snapshot.

use std::ops::Sub;
use std::time::Instant;

use crate::vec::Vec3;

/// Number of landmarks that make up a [`Hand`].
pub const NUM_HAND_LANDMARKS: usize = 21;

/// A single tracked anatomical point in 3D space.
///
/// Construction sanitizes the coordinates: any non-finite component is replaced with `0.0`, so
/// NaN or infinity from a perception adapter can never propagate into derived vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pos: [f32; 3],
    score: Option<f32>,
}

impl Landmark {
    /// Creates a landmark from raw estimator coordinates, sanitizing non-finite components.
    pub fn new(position: [f32; 3]) -> Self {
        Self {
            pos: position.map(|v| if v.is_finite() { v } else { 0.0 }),
            score: None,
        }
    }

    /// Attaches a tracking confidence score to this landmark.
    pub fn with_score(self, score: f32) -> Self {
        Self {
            score: Some(score),
            ..self
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.pos[2]
    }

    /// Returns the position as a [`Vec3`].
    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3 {
            x: self.pos[0],
            y: self.pos[1],
            z: self.pos[2],
        }
    }

    /// Returns the tracking confidence of this landmark, if the adapter provided one.
    #[inline]
    pub fn score(&self) -> Option<f32> {
        self.score
    }
}

/// `b - a` is the displacement from `a`'s position to `b`'s position.
impl Sub for Landmark {
    type Output = Vec3;

    fn sub(self, rhs: Self) -> Vec3 {
        self.position() - rhs.position()
    }
}

/// Which of the subject's hands a [`Hand`] represents.
///
/// Left and right hands are mirror images, so handedness decides the winding order of the
/// palm-plane basis vectors during featurization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// Names for the hand pose landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// The joint chain of the thumb, ordered proximal to distal.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumb {
    pub cmc: Landmark,
    pub mcp: Landmark,
    pub ip: Landmark,
    pub tip: Landmark,
}

/// The joint chain of a (non-thumb) finger, ordered proximal to distal.
#[derive(Debug, Clone, PartialEq)]
pub struct Finger {
    pub mcp: Landmark,
    pub pip: Landmark,
    pub dip: Landmark,
    pub tip: Landmark,
}

/// All tracked landmarks of one hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    pub handedness: Handedness,
    pub wrist: Landmark,
    pub thumb: Thumb,
    pub index_finger: Finger,
    pub middle_finger: Finger,
    pub ring_finger: Finger,
    pub pinky_finger: Finger,
}

impl Hand {
    /// Assembles a [`Hand`] from the 21 landmark positions produced by a MediaPipe-style hand
    /// landmark network, in [`LandmarkIdx`] order.
    ///
    /// This is the uniform input contract for perception adapters: whatever the adapter's own
    /// landmark format looks like, it maps into this method's argument.
    pub fn from_positions(
        handedness: Handedness,
        positions: &[[f32; 3]; NUM_HAND_LANDMARKS],
    ) -> Self {
        use LandmarkIdx::*;

        let lm = |idx: LandmarkIdx| Landmark::new(positions[idx as usize]);
        Self {
            handedness,
            wrist: lm(Wrist),
            thumb: Thumb {
                cmc: lm(ThumbCmc),
                mcp: lm(ThumbMcp),
                ip: lm(ThumbIp),
                tip: lm(ThumbTip),
            },
            index_finger: Finger {
                mcp: lm(IndexFingerMcp),
                pip: lm(IndexFingerPip),
                dip: lm(IndexFingerDip),
                tip: lm(IndexFingerTip),
            },
            middle_finger: Finger {
                mcp: lm(MiddleFingerMcp),
                pip: lm(MiddleFingerPip),
                dip: lm(MiddleFingerDip),
                tip: lm(MiddleFingerTip),
            },
            ring_finger: Finger {
                mcp: lm(RingFingerMcp),
                pip: lm(RingFingerPip),
                dip: lm(RingFingerDip),
                tip: lm(RingFingerTip),
            },
            pinky_finger: Finger {
                mcp: lm(PinkyMcp),
                pip: lm(PinkyPip),
                dip: lm(PinkyDip),
                tip: lm(PinkyTip),
            },
        }
    }
}

/// An immutable snapshot of one body's tracked hands for a single captured frame.
///
/// Either hand may be absent when it is not currently tracked (out of frame or occluded). A body
/// with both hands absent is still a valid snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    timestamp: Instant,
    left_hand: Option<Hand>,
    right_hand: Option<Hand>,
}

impl Body {
    /// Creates a snapshot from the hands tracked in the current frame, stamped with the current
    /// time.
    pub fn new(left_hand: Option<Hand>, right_hand: Option<Hand>) -> Self {
        Self {
            timestamp: Instant::now(),
            left_hand,
            right_hand,
        }
    }

    /// The time at which this snapshot was created.
    #[inline]
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    #[inline]
    pub fn left_hand(&self) -> Option<&Hand> {
        self.left_hand.as_ref()
    }

    #[inline]
    pub fn right_hand(&self) -> Option<&Hand> {
        self.right_hand.as_ref()
    }

    /// Returns the tracked hand with the given [`Handedness`], if present.
    pub fn hand(&self, handedness: Handedness) -> Option<&Hand> {
        match handedness {
            Handedness::Left => self.left_hand(),
            Handedness::Right => self.right_hand(),
        }
    }
}
