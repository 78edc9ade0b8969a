//! Subscription settings and the transport seam topic clients talk through

use ros3d_core::Result;
use serde::{Deserialize, Serialize};

/// Message compression requested from the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    None,
    #[default]
    Png,
    Cbor,
}

impl Compression {
    /// Name used in bridge subscribe requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Png => "png",
            Compression::Cbor => "cbor",
        }
    }
}

/// Everything a transport needs to open a subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicOptions {
    pub name: String,
    pub message_type: String,
    pub compression: Compression,
    /// Messages buffered by the bridge; 0 means unbounded
    pub queue_length: u32,
    /// Minimum milliseconds between delivered messages
    pub throttle_rate_ms: Option<u32>,
}

impl TopicOptions {
    /// Subscription to `name` carrying `message_type`, uncompressed and unthrottled
    pub fn new(name: impl Into<String>, message_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message_type: message_type.into(),
            compression: Compression::None,
            queue_length: 0,
            throttle_rate_ms: None,
        }
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_queue_length(mut self, queue_length: u32) -> Self {
        self.queue_length = queue_length;
        self
    }

    pub fn with_throttle_rate(mut self, throttle_rate_ms: u32) -> Self {
        self.throttle_rate_ms = Some(throttle_rate_ms);
        self
    }
}

/// Publish/subscribe connection, e.g. a rosbridge websocket session
///
/// Messages for a subscribed topic are handed to the owning client by
/// whatever drives the transport; the client only opens and closes
/// subscriptions through this trait.
pub trait Transport {
    /// Open a subscription described by `options`
    fn subscribe(&mut self, options: &TopicOptions) -> Result<()>;

    /// Close the subscription on `topic`
    fn unsubscribe(&mut self, topic: &str) -> Result<()>;
}

/// Frame of reference updates for scene nodes
pub trait TfClient {
    /// Start delivering transforms for `frame_id`
    fn subscribe(&mut self, frame_id: &str);

    /// Stop delivering transforms for `frame_id`
    fn unsubscribe(&mut self, frame_id: &str);
}
