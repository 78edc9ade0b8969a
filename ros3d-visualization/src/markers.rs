//! Lifecycle of markers received as `visualization_msgs/MarkerArray`
//!
//! Markers are identified by namespace and id. An ADD for a known marker is
//! first offered to the existing object as an in-place update; if the object
//! cannot absorb the change it is replaced.

use std::collections::HashMap;

use ros3d_core::{Pose, Result};
use serde::{Deserialize, Serialize};

use crate::scene_node::SceneNode;
use crate::topic::{Compression, TfClient, TopicOptions, Transport};

/// ROS message type consumed by [`MarkerArrayClient`]
pub const MARKER_ARRAY_TYPE: &str = "visualization_msgs/MarkerArray";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    pub frame_id: String,
}

/// The parts of a `visualization_msgs/Marker` the lifecycle depends on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Marker {
    pub header: Header,
    pub ns: String,
    pub id: i32,
    #[serde(rename = "type")]
    pub marker_type: i32,
    pub action: i32,
    pub pose: Pose,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerArray {
    pub markers: Vec<Marker>,
}

/// What a marker's `action` field asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAction {
    /// Add, or modify when the marker already exists
    Add,
    /// Former MODIFY code; ignored
    Deprecated,
    Delete,
    DeleteAll,
    Unknown(i32),
}

impl From<i32> for MarkerAction {
    fn from(action: i32) -> Self {
        match action {
            0 => MarkerAction::Add,
            1 => MarkerAction::Deprecated,
            2 => MarkerAction::Delete,
            3 => MarkerAction::DeleteAll,
            other => MarkerAction::Unknown(other),
        }
    }
}

/// Identity of a marker within an array stream
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerKey {
    pub ns: String,
    pub id: i32,
}

impl MarkerKey {
    pub fn new(ns: impl Into<String>, id: i32) -> Self {
        Self { ns: ns.into(), id }
    }
}

impl From<&Marker> for MarkerKey {
    fn from(marker: &Marker) -> Self {
        Self::new(marker.ns.clone(), marker.id)
    }
}

/// A displayable marker
pub trait MarkerObject {
    /// Apply a newer message for the same marker in place
    ///
    /// Returns `false` when the change cannot be applied (e.g. the marker
    /// type changed) and the object must be rebuilt.
    fn update(&mut self, message: &Marker) -> bool;
}

/// Builds marker objects from messages
pub trait MarkerFactory {
    type Object: MarkerObject;

    /// Create the object for `message`; `path` is the base path for mesh resources
    fn create(&self, message: &Marker, path: &str) -> Self::Object;
}

/// Configuration for a marker array subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerArrayOptions {
    pub topic: String,
    /// Base path for mesh resources referenced by markers
    pub path: String,
    pub queue_length: u32,
}

impl Default for MarkerArrayOptions {
    fn default() -> Self {
        Self {
            topic: String::new(),
            path: "/".to_string(),
            queue_length: 2,
        }
    }
}

impl MarkerArrayOptions {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// Tally of what one array did to the displayed markers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerChanges {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Keeps the set of displayed markers in sync with a marker array topic
pub struct MarkerArrayClient<F: MarkerFactory> {
    options: MarkerArrayOptions,
    factory: F,
    markers: HashMap<MarkerKey, SceneNode<F::Object>>,
    subscribed: bool,
    changes: u64,
}

impl<F: MarkerFactory> MarkerArrayClient<F> {
    pub fn new(options: MarkerArrayOptions, factory: F) -> Self {
        Self {
            options,
            factory,
            markers: HashMap::new(),
            subscribed: false,
            changes: 0,
        }
    }

    /// Subscription request for the configured topic
    pub fn topic_options(&self) -> TopicOptions {
        TopicOptions::new(self.options.topic.clone(), MARKER_ARRAY_TYPE)
            .with_compression(Compression::Png)
            .with_queue_length(self.options.queue_length)
    }

    /// (Re)subscribe to the marker topic
    pub fn subscribe(&mut self, transport: &mut dyn Transport) -> Result<()> {
        self.unsubscribe(transport)?;
        transport.subscribe(&self.topic_options())?;
        self.subscribed = true;
        Ok(())
    }

    /// Close the subscription if one is open; displayed markers are kept
    pub fn unsubscribe(&mut self, transport: &mut dyn Transport) -> Result<()> {
        if self.subscribed {
            transport.unsubscribe(&self.options.topic)?;
            self.subscribed = false;
        }
        Ok(())
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Apply every marker in `array` in order
    pub fn process_message(&mut self, array: &MarkerArray, tf_client: &mut dyn TfClient) -> MarkerChanges {
        let mut changes = MarkerChanges::default();

        for message in &array.markers {
            match MarkerAction::from(message.action) {
                MarkerAction::Add => self.add_or_modify(message, tf_client, &mut changes),
                MarkerAction::Deprecated => {
                    log::warn!("Received marker message with deprecated action identifier \"1\"");
                }
                MarkerAction::Delete => {
                    if let Some(node) = self.markers.remove(&MarkerKey::from(message)) {
                        node.unsubscribe_tf(tf_client);
                        changes.removed += 1;
                        log::debug!("deleted marker {}/{}", message.ns, message.id);
                    }
                }
                MarkerAction::DeleteAll => {
                    changes.removed += self.clear(tf_client);
                }
                MarkerAction::Unknown(action) => {
                    log::warn!("Received marker message with unknown action identifier \"{}\"", action);
                }
            }
        }

        self.changes += 1;
        changes
    }

    fn add_or_modify(&mut self, message: &Marker, tf_client: &mut dyn TfClient, changes: &mut MarkerChanges) {
        let key = MarkerKey::from(message);

        if let Some(node) = self.markers.get_mut(&key) {
            if node.object_mut().update(message) {
                changes.updated += 1;
                return;
            }
            node.unsubscribe_tf(tf_client);
            self.markers.remove(&key);
            changes.removed += 1;
        }

        let object = self.factory.create(message, &self.options.path);
        let node = SceneNode::new(&message.header.frame_id, Pose::identity(), object, Some(tf_client));
        log::debug!("added marker {}/{} in frame {}", message.ns, message.id, node.frame_id());
        self.markers.insert(key, node);
        changes.added += 1;
    }

    fn clear(&mut self, tf_client: &mut dyn TfClient) -> usize {
        let removed = self.markers.len();
        for (_, node) in self.markers.drain() {
            node.unsubscribe_tf(tf_client);
        }
        removed
    }

    /// Unsubscribe and drop every displayed marker
    pub fn remove_array(&mut self, transport: &mut dyn Transport, tf_client: &mut dyn TfClient) -> Result<()> {
        self.unsubscribe(transport)?;
        self.clear(tf_client);
        Ok(())
    }

    /// Number of arrays processed so far
    pub fn changes(&self) -> u64 {
        self.changes
    }

    pub fn get(&self, key: &MarkerKey) -> Option<&SceneNode<F::Object>> {
        self.markers.get(key)
    }

    pub fn markers(&self) -> impl Iterator<Item = (&MarkerKey, &SceneNode<F::Object>)> + '_ {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
