//! # Line-Art Extraction Library
//!
//! Turns a captured raster image into binary line art and decomposes it into
//! ordered stroke paths suitable for pointer playback.
//!
//! ## Processing stages
//!
//! - **Edge extraction**: grayscale → gaussian blur → canny → optional
//!   polarity inversion, producing a two-valued [`EdgeMask`]
//! - **Contour decomposition**: flat border following with straight-run
//!   compression, producing ordered [`Contour`] paths
//! - **Stroke simplification**: fixed-stride decimation (or Douglas-Peucker)
//!   to bound stroke density
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lineart::{LineartConfig, Pipeline};
//!
//! let capture = image::open("capture.png")?;
//! let pipeline = Pipeline::from_config(&LineartConfig::default());
//! let (mask, strokes) = pipeline.process(&capture)?;
//! println!("{} strokes from a {}x{} mask", strokes.len(), mask.width(), mask.height());
//! # Ok::<(), lineart::LineartError>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use lineart::{Pipeline, algorithms::*};
//!
//! let pipeline = Pipeline::builder()
//!     .add_preprocessor(GaussianBlurPreprocessor { sigma: 2.0 })
//!     .set_detector(CannyEdgeDetector { threshold_low: 30.0, threshold_high: 90.0 })
//!     .invert(true)
//!     .with_stride(3)
//!     .build();
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod manager;
pub mod pipeline;
pub mod traits;
pub mod types;

pub use config::LineartConfig;
pub use error::{LineartError, Result};
pub use manager::SketchManager;
pub use pipeline::{builder::PipelineBuilder, Pipeline};
pub use traits::*;
pub use types::{Contour, EdgeMask, Point, BINARY_CUTOFF};

/// Decompose line art with the default border-following extractor.
///
/// Convenience for callers that hold an [`EdgeMask`] but no [`Pipeline`],
/// such as playback setup.
pub fn decompose(mask: &EdgeMask) -> Result<Vec<Contour>> {
    algorithms::BorderFollowingExtractor.extract(mask)
}
