//! Headless frame loop.
//!
//! Stands in for the browser's animation-frame callback. Each frame:
//!
//! 1. Advance the scene by a fixed delta time.
//! 2. Evaluate the scene's draw calls.
//! 3. Advance the frame counter.
//!
//! Frames are computed back to back; nothing sleeps.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::scene::{DrawCall, Scene, SceneKind};

/// Configuration for the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    /// Simulated frames per second; sets the delta time handed to scenes.
    pub frame_rate: f32,
    /// Number of frames [`FrameLoop::run`] produces.
    pub max_frames: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            max_frames: 1,
        }
    }
}

impl FrameConfig {
    /// Milliseconds between frames.
    #[must_use]
    pub fn delta_ms(&self) -> f32 {
        1000.0 / self.frame_rate
    }
}

/// Everything one frame uploads and draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Zero-based frame counter.
    pub index: u64,
    /// Which scene produced the frame.
    pub scene: SceneKind,
    /// Time since the previous frame.
    pub delta_ms: f32,
    pub draw_calls: Vec<DrawCall>,
}

/// Drives a [`Scene`] frame by frame.
pub struct FrameLoop {
    /// Next frame counter.
    frame_id: u64,
    config: FrameConfig,
    scene_config: SceneConfig,
    scene: Box<dyn Scene>,
}

impl FrameLoop {
    /// Create a new frame loop.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidConfig`] if `scene_config` fails
    /// validation or the frame rate is not positive.
    pub fn new(
        scene: Box<dyn Scene>,
        config: FrameConfig,
        scene_config: SceneConfig,
    ) -> Result<Self, SceneError> {
        scene_config.validate()?;
        if !(config.frame_rate > 0.0) {
            return Err(SceneError::InvalidConfig(format!(
                "frame rate must be positive, got {}",
                config.frame_rate
            )));
        }
        Ok(Self {
            frame_id: 0,
            config,
            scene_config,
            scene,
        })
    }

    /// Returns the number of frames produced so far.
    #[must_use]
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Returns the scene being driven.
    #[must_use]
    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    /// Execute a single frame.
    ///
    /// The first frame is evaluated in the scene's initial state with a
    /// delta of zero; later frames advance the scene first.
    ///
    /// # Errors
    ///
    /// Propagates scene evaluation errors.
    pub fn step(&mut self) -> Result<Frame, SceneError> {
        let delta_ms = if self.frame_id == 0 {
            0.0
        } else {
            let delta_ms = self.config.delta_ms();
            self.scene.update(delta_ms);
            delta_ms
        };

        let draw_calls = self.scene.draw_calls(&self.scene_config)?;
        let kind = self.scene.kind();

        debug!(
            frame_id = self.frame_id,
            scene = ?kind,
            draw_calls = draw_calls.len(),
            "frame evaluated"
        );
        if !draw_calls.iter().any(DrawCall::is_visible) {
            warn!(frame_id = self.frame_id, scene = ?kind, "frame draws nothing on screen");
        }

        let frame = Frame {
            index: self.frame_id,
            scene: kind,
            delta_ms,
            draw_calls,
        };
        self.frame_id += 1;
        Ok(frame)
    }

    /// Run `max_frames` frames and collect them.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnboundedRun`] if `max_frames` is zero, or the
    /// first scene evaluation error.
    pub fn run(&mut self) -> Result<Vec<Frame>, SceneError> {
        if self.config.max_frames == 0 {
            return Err(SceneError::UnboundedRun);
        }

        info!(
            scene = ?self.scene.kind(),
            frames = self.config.max_frames,
            frame_rate = self.config.frame_rate,
            "frame loop starting"
        );

        let frames = (0..self.config.max_frames)
            .map(|_| self.step())
            .collect::<Result<Vec<_>, _>>()?;

        info!(frames = frames.len(), "frame loop complete");
        Ok(frames)
    }
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("frame_id", &self.frame_id)
            .field("config", &self.config)
            .field("scene", &self.scene.kind())
            .finish()
    }
}
