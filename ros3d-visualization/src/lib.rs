//! Topic clients that keep scene content in sync with ROS messages
//!
//! This crate connects a publish/subscribe transport to displayable data:
//! - Point cloud streams decoded into a render buffer
//! - Marker arrays maintained as a keyed set of scene nodes
//! - Scene nodes placed on TF frames

pub mod markers;
pub mod point_cloud;
pub mod scene_node;
pub mod topic;

pub use markers::*;
pub use point_cloud::*;
pub use scene_node::*;
pub use topic::*;
