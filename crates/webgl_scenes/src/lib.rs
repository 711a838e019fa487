//! # webgl_scenes
//!
//! Headless evaluator for the WebGL basics demo sequence. Each scene computes
//! exactly the matrices its demo uploads through `uniformMatrix{3,4}fv`,
//! without touching a GL context.
//!
//! This crate provides:
//!
//! - [`scene`] — the demo scenes and their draw calls.
//! - [`geometry`] — the "F" vertex data and the CPU clip-space check.
//! - [`frame`] — the fixed-delta frame loop.
//! - [`config`] — canvas and camera parameters.
//! - [`codec`] — MessagePack / JSON frame dumps.
//! - [`error`] — scene-layer error types.
//!
//! ## Usage
//!
//! ```rust
//! use webgl_scenes::{FrameConfig, FrameLoop, SceneConfig, SceneKind};
//!
//! let config = FrameConfig { frame_rate: 60.0, max_frames: 3 };
//! let mut frames = FrameLoop::new(SceneKind::OrbitCamera.build(), config, SceneConfig::default())
//!     .unwrap();
//! let run = frames.run().unwrap();
//! assert_eq!(run.len(), 3);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod scene;

pub use config::SceneConfig;
pub use error::SceneError;
pub use frame::{Frame, FrameConfig, FrameLoop};
pub use scene::{DrawCall, OrbitCamera, Scene, SceneKind, UniformMatrix};
