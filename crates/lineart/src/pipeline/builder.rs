use crate::{
    algorithms::{
        BorderFollowingExtractor, CannyEdgeDetector, DouglasPeuckerSimplifier, StrideSimplifier,
    },
    pipeline::Pipeline,
    traits::{ContourExtractor, EdgeDetector, ImagePreprocessor, StrokeSimplifier},
};

/// Builder for assembling processing pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    detector: Option<Box<dyn EdgeDetector>>,
    invert: bool,
    extractor: Option<Box<dyn ContourExtractor>>,
    simplifier: Option<Box<dyn StrokeSimplifier>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            detector: None,
            invert: false,
            extractor: None,
            simplifier: None,
        }
    }

    /// Add a preprocessor to the pipeline
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the edge detector (replaces any existing one)
    pub fn set_detector<D>(mut self, detector: D) -> Self
    where
        D: EdgeDetector + 'static,
    {
        self.detector = Some(Box::new(detector));
        self
    }

    /// Render dark strokes on a bright background
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.extractor = Some(Box::new(extractor));
        self
    }

    /// Set the stroke simplifier (replaces any existing one)
    pub fn set_simplifier<S>(mut self, simplifier: S) -> Self
    where
        S: StrokeSimplifier + 'static,
    {
        self.simplifier = Some(Box::new(simplifier));
        self
    }

    /// Thin strokes by keeping every nth point
    pub fn with_stride(self, stride: i32) -> Self {
        self.set_simplifier(StrideSimplifier { stride })
    }

    /// Thin strokes with Douglas-Peucker simplification
    pub fn with_douglas_peucker(self, tolerance: f32) -> Self {
        self.set_simplifier(DouglasPeuckerSimplifier { tolerance })
    }

    /// Build the pipeline with default components where none were specified
    pub fn build(self) -> Pipeline {
        let detector = self
            .detector
            .unwrap_or_else(|| Box::new(CannyEdgeDetector::default()));
        let extractor = self
            .extractor
            .unwrap_or_else(|| Box::new(BorderFollowingExtractor));
        let simplifier = self
            .simplifier
            .unwrap_or_else(|| Box::new(StrideSimplifier::default()));

        Pipeline::new(
            self.preprocessors,
            detector,
            self.invert,
            extractor,
            simplifier,
        )
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
