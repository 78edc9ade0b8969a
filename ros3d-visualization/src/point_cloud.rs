//! Streaming point cloud display backed by a fixed-size frame buffer

use ros3d_core::{FrameBuffer, Result};
use ros3d_io::{DecodeResult, PointCloud2, PointCloudDecoder};
use serde::{Deserialize, Serialize};

use crate::topic::{Compression, TopicOptions, Transport};

/// ROS message type streamed by [`PointCloudClient`]
pub const POINT_CLOUD2_TYPE: &str = "sensor_msgs/PointCloud2";

/// Configuration for a point cloud subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointCloudOptions {
    pub topic: String,
    /// Rendered point size in pixels
    pub point_size: f32,
    /// Grid width the render buffer is sized for
    pub width: usize,
    /// Grid height the render buffer is sized for
    pub height: usize,
    pub queue_length: u32,
    pub throttle_rate_ms: u32,
    pub compression: Compression,
    pub opacity: f32,
    pub transparent: bool,
}

impl Default for PointCloudOptions {
    fn default() -> Self {
        Self {
            topic: String::new(),
            point_size: 3.0,
            width: 640,
            height: 480,
            queue_length: 0,
            throttle_rate_ms: 500,
            compression: Compression::Png,
            opacity: 1.0,
            transparent: false,
        }
    }
}

impl PointCloudOptions {
    /// Default options for `topic`
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_point_size(mut self, point_size: f32) -> Self {
        self.point_size = point_size;
        self
    }

    pub fn with_queue_length(mut self, queue_length: u32) -> Self {
        self.queue_length = queue_length;
        self
    }

    pub fn with_throttle_rate(mut self, throttle_rate_ms: u32) -> Self {
        self.throttle_rate_ms = throttle_rate_ms;
        self
    }

    pub fn with_opacity(mut self, opacity: f32, transparent: bool) -> Self {
        self.opacity = opacity;
        self.transparent = transparent;
        self
    }

    /// Point size in scene units (meters)
    pub fn point_size_meters(&self) -> f32 {
        self.point_size / 1000.0
    }
}

/// Subscribes to a `PointCloud2` topic and decodes every frame into one buffer
///
/// The buffer is allocated once from the configured grid size. Frames that
/// fail to decode are dropped and the last good frame stays on display.
#[derive(Debug)]
pub struct PointCloudClient {
    options: PointCloudOptions,
    buffer: FrameBuffer,
    decoder: PointCloudDecoder,
    streaming: bool,
    frames_decoded: u64,
    frames_dropped: u64,
}

impl PointCloudClient {
    /// Create a client and allocate its render buffer
    ///
    /// # Panics
    ///
    /// Panics if the configured width or height is zero.
    pub fn new(options: PointCloudOptions) -> Self {
        let buffer = FrameBuffer::allocate(options.width, options.height);
        Self {
            options,
            buffer,
            decoder: PointCloudDecoder::new(),
            streaming: false,
            frames_decoded: 0,
            frames_dropped: 0,
        }
    }

    pub fn options(&self) -> &PointCloudOptions {
        &self.options
    }

    /// Subscription request for the configured topic
    pub fn topic_options(&self) -> TopicOptions {
        TopicOptions::new(self.options.topic.clone(), POINT_CLOUD2_TYPE)
            .with_compression(self.options.compression)
            .with_queue_length(self.options.queue_length)
            .with_throttle_rate(self.options.throttle_rate_ms)
    }

    /// Start receiving frames; a no-op while already streaming
    pub fn start_stream(&mut self, transport: &mut dyn Transport) -> Result<()> {
        if self.streaming {
            return Ok(());
        }
        transport.subscribe(&self.topic_options())?;
        log::debug!("streaming point clouds from {}", self.options.topic);
        self.streaming = true;
        Ok(())
    }

    /// Stop receiving frames; the buffer keeps the last decoded frame
    pub fn stop_stream(&mut self, transport: &mut dyn Transport) -> Result<()> {
        if !self.streaming {
            return Ok(());
        }
        transport.unsubscribe(&self.options.topic)?;
        log::debug!("stopped streaming point clouds from {}", self.options.topic);
        self.streaming = false;
        Ok(())
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Decode one delivered frame into the render buffer
    ///
    /// On error the frame is counted as dropped and the buffer is left as it
    /// was; the error is returned for callers that want to surface it.
    pub fn handle_message(&mut self, message: &PointCloud2) -> DecodeResult<()> {
        match self.decoder.decode(message, &mut self.buffer) {
            Ok(()) => {
                self.frames_decoded += 1;
                Ok(())
            }
            Err(err) => {
                self.frames_dropped += 1;
                log::warn!("dropping point cloud frame from {}: {}", self.options.topic, err);
                Err(err)
            }
        }
    }

    /// Frames decoded successfully, including ignored empty frames
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /// Frames rejected by the decoder
    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Mutable access for the renderer to acknowledge dirty signals
    pub fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::testing::RecordingTransport;
    use ros3d_core::Point3f;
    use ros3d_io::{DecodeError, FrameEncoder};

    #[test]
    fn test_default_options() {
        let options = PointCloudOptions::new("/camera/depth/points");
        assert_eq!(options.width, 640);
        assert_eq!(options.height, 480);
        assert_eq!(options.throttle_rate_ms, 500);
        assert_eq!(options.point_size_meters(), 0.003);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: PointCloudOptions =
            serde_json::from_str(r#"{"topic": "/points", "width": 4, "height": 2}"#).unwrap();
        assert_eq!(options.topic, "/points");
        assert_eq!(options.width, 4);
        assert_eq!(options.compression, Compression::Png);
        assert_eq!(options.point_size, 3.0);
    }

    #[test]
    fn test_buffer_sized_from_options() {
        let client = PointCloudClient::new(PointCloudOptions::new("/points").with_size(8, 6));
        assert_eq!(client.buffer().capacity(), 48);
        assert_eq!(client.buffer().positions().len(), 144);
    }

    #[test]
    fn test_stream_lifecycle() {
        let mut transport = RecordingTransport::default();
        let mut client = PointCloudClient::new(
            PointCloudOptions::new("/points").with_size(2, 2).with_queue_length(1),
        );

        client.start_stream(&mut transport).unwrap();
        client.start_stream(&mut transport).unwrap();
        assert!(client.is_streaming());
        assert_eq!(transport.subscribed.len(), 1);

        let sub = &transport.subscribed[0];
        assert_eq!(sub.name, "/points");
        assert_eq!(sub.message_type, POINT_CLOUD2_TYPE);
        assert_eq!(sub.compression, Compression::Png);
        assert_eq!(sub.queue_length, 1);
        assert_eq!(sub.throttle_rate_ms, Some(500));

        client.stop_stream(&mut transport).unwrap();
        assert!(!client.is_streaming());
        assert_eq!(transport.unsubscribed, vec!["/points".to_string()]);
    }

    #[test]
    fn test_failed_subscribe_keeps_client_idle() {
        let mut transport = RecordingTransport {
            fail_subscribe: true,
            ..Default::default()
        };
        let mut client = PointCloudClient::new(PointCloudOptions::new("/points").with_size(1, 1));
        assert!(client.start_stream(&mut transport).is_err());
        assert!(!client.is_streaming());
    }

    #[test]
    fn test_bad_frame_is_dropped() {
        let mut client = PointCloudClient::new(PointCloudOptions::new("/points").with_size(1, 1));
        let good = FrameEncoder::new(32).encode(1, 1, &[Point3f::new(1.0, 2.0, 3.0)], Some(&[[255, 255, 255]][..]));
        client.handle_message(&good).unwrap();
        assert!(client.buffer_mut().take_dirty());

        let bad = PointCloud2 {
            point_step: 4,
            ..good.clone()
        };
        assert!(matches!(
            client.handle_message(&bad),
            Err(DecodeError::MalformedStride { point_step: 4, .. })
        ));

        assert_eq!(client.frames_decoded(), 1);
        assert_eq!(client.frames_dropped(), 1);
        assert_eq!(client.buffer().position(0), Point3f::new(1.0, 2.0, 3.0));
        assert_eq!(client.buffer().color(0), [1.0, 1.0, 1.0]);
        assert!(!client.buffer().is_dirty());
    }
}
