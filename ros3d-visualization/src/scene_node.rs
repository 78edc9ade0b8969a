//! Scene objects placed relative to a ROS frame

use nalgebra::Isometry3;
use ros3d_core::{Pose, Transform};

use crate::topic::TfClient;

/// An object tracked in the scene with respect to a TF frame
///
/// The node keeps the object's pose in its own frame; every transform
/// delivered for that frame recomputes the world placement from it.
#[derive(Debug, Clone)]
pub struct SceneNode<O> {
    frame_id: String,
    pose: Pose,
    world: Isometry3<f32>,
    object: O,
}

impl<O> SceneNode<O> {
    /// Wrap `object` at `pose` in `frame_id`, subscribing to TF if a client is given
    ///
    /// A leading `/` on the frame id is dropped.
    pub fn new(frame_id: &str, pose: Pose, object: O, tf_client: Option<&mut dyn TfClient>) -> Self {
        let frame_id = frame_id.strip_prefix('/').unwrap_or(frame_id).to_string();
        if let Some(tf) = tf_client {
            tf.subscribe(&frame_id);
        }
        Self {
            world: pose.to_isometry(),
            frame_id,
            pose,
            object,
        }
    }

    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    /// Pose of the object in its own frame
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Current placement in the scene
    pub fn world(&self) -> &Isometry3<f32> {
        &self.world
    }

    /// Place the node directly at `pose`
    pub fn update_pose(&mut self, pose: &Pose) {
        self.world = pose.to_isometry();
    }

    /// Place the node at its own pose carried through `transform`
    pub fn transform_pose(&mut self, transform: &Transform) {
        let transformed = self.pose.transformed(transform);
        self.update_pose(&transformed);
    }

    /// Stop following the node's frame
    pub fn unsubscribe_tf(&self, tf_client: &mut dyn TfClient) {
        tf_client.unsubscribe(&self.frame_id);
    }

    pub fn object(&self) -> &O {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut O {
        &mut self.object
    }
}
