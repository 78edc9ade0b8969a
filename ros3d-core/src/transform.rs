//! Pose and transform math for scene objects attached to ROS frames

use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::point::Point3f;

/// `{x, y, z}` as it appears on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Vector3Msg {
    x: f64,
    y: f64,
    z: f64,
}

/// `{x, y, z, w}` as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct QuaternionMsg {
    x: f64,
    y: f64,
    z: f64,
    w: f64,
}

impl Default for QuaternionMsg {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }
}

impl From<Vector3Msg> for Vector3<f32> {
    fn from(v: Vector3Msg) -> Self {
        Vector3::new(v.x as f32, v.y as f32, v.z as f32)
    }
}

impl From<Vector3<f32>> for Vector3Msg {
    fn from(v: Vector3<f32>) -> Self {
        Self { x: v.x as f64, y: v.y as f64, z: v.z as f64 }
    }
}

impl From<QuaternionMsg> for UnitQuaternion<f32> {
    fn from(q: QuaternionMsg) -> Self {
        let raw = Quaternion::new(q.w as f32, q.x as f32, q.y as f32, q.z as f32);
        // An all-zero quaternion is what unset message fields look like.
        if raw.norm_squared() == 0.0 {
            UnitQuaternion::identity()
        } else {
            UnitQuaternion::from_quaternion(raw)
        }
    }
}

impl From<UnitQuaternion<f32>> for QuaternionMsg {
    fn from(q: UnitQuaternion<f32>) -> Self {
        Self { x: q.i as f64, y: q.j as f64, z: q.k as f64, w: q.w as f64 }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct PoseMsg {
    position: Vector3Msg,
    orientation: QuaternionMsg,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct TransformMsg {
    translation: Vector3Msg,
    rotation: QuaternionMsg,
}

/// Position and orientation of an object relative to its frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PoseMsg", into = "PoseMsg")]
pub struct Pose {
    pub position: Point3f,
    pub orientation: UnitQuaternion<f32>,
}

/// A rigid transform as published on the TF tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransformMsg", into = "TransformMsg")]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl From<PoseMsg> for Pose {
    fn from(msg: PoseMsg) -> Self {
        Self {
            position: Vector3::<f32>::from(msg.position).into(),
            orientation: msg.orientation.into(),
        }
    }
}

impl From<Pose> for PoseMsg {
    fn from(pose: Pose) -> Self {
        Self {
            position: pose.position.coords.into(),
            orientation: pose.orientation.into(),
        }
    }
}

impl From<TransformMsg> for Transform {
    fn from(msg: TransformMsg) -> Self {
        Self {
            translation: msg.translation.into(),
            rotation: msg.rotation.into(),
        }
    }
}

impl From<Transform> for TransformMsg {
    fn from(tf: Transform) -> Self {
        Self {
            translation: tf.translation.into(),
            rotation: tf.rotation.into(),
        }
    }
}

impl Pose {
    /// Create a pose from a position and orientation
    pub fn new(position: Point3f, orientation: UnitQuaternion<f32>) -> Self {
        Self { position, orientation }
    }

    /// The pose at the frame origin with no rotation
    pub fn identity() -> Self {
        Self::new(Point3f::origin(), UnitQuaternion::identity())
    }

    /// Express this pose in the parent frame of `tf`
    pub fn apply_transform(&mut self, tf: &Transform) {
        self.position = tf.rotation * self.position + tf.translation;
        self.orientation = tf.rotation * self.orientation;
    }

    /// Copy of this pose expressed in the parent frame of `tf`
    pub fn transformed(&self, tf: &Transform) -> Self {
        let mut pose = *self;
        pose.apply_transform(tf);
        pose
    }

    /// World matrix equivalent of this pose
    pub fn to_isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.orientation)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create a transform from a translation and rotation
    pub fn new(translation: Vector3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self { translation, rotation }
    }

    /// The transform that leaves poses unchanged
    pub fn identity() -> Self {
        Self::new(Vector3::zeros(), UnitQuaternion::identity())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Transform> for Isometry3<f32> {
    fn from(tf: Transform) -> Self {
        Isometry3::from_parts(Translation3::from(tf.translation), tf.rotation)
    }
}
