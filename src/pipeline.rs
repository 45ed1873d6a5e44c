//! Flattening transform pipelines.
//!
//! A [`Pipeline`] is an ordered list of unary [`Step`]s folded over a sampled
//! value, left to right. Pipelines are built from [`PipelineSpec`]s — a single
//! step, an ordered sequence of specs, or another pipeline — and the whole
//! nesting is flattened depth-first at build time. That lets a reusable chunk
//! (say, `invert → deadband`) be defined once and spliced into larger chains
//! without the caller flattening anything by hand.
//!
//! ## Semantics
//! - `run` on an empty pipeline is the identity.
//! - Steps are applied strictly in first-to-last order of the fully expanded
//!   spec nesting.
//! - No compatibility checking happens at build time; a step that rejects its
//!   input fails the whole `run` with a [`StepError`].
//! - Each binding owns its pipeline. Splicing a pipeline into another copies
//!   nothing implicitly — [`PipelineSpec::Sub`] moves the donor's steps in.

use thiserror::Error;

use crate::sample::Sample;

/// A single unary transform over a [`Sample`].
///
/// Implemented for any `FnMut(Sample) -> Result<Sample, StepError> + Send`
/// closure, so ad-hoc transforms don't need a named type:
///
/// ```
/// use tickup::pipeline::{PipelineSpec, Pipeline};
/// use tickup::sample::Sample;
///
/// let mut p = Pipeline::new([PipelineSpec::step(|s: Sample| Ok(Sample::Analog(s.as_analog() * 2.0)))]);
/// assert_eq!(p.run(Sample::Analog(0.5)).unwrap(), Sample::Analog(1.0));
/// ```
pub trait Step: Send {
    fn apply(&mut self, value: Sample) -> Result<Sample, StepError>;
}

impl<F> Step for F
where
    F: FnMut(Sample) -> Result<Sample, StepError> + Send,
{
    fn apply(&mut self, value: Sample) -> Result<Sample, StepError> {
        self(value)
    }
}

/// Failure of one step during [`Pipeline::run`].
#[derive(Debug, Error)]
pub enum StepError {
    /// A numeric-only step was fed a button sample.
    #[error("step `{step}` expects an analog sample, got {got}")]
    NotAnalog {
        /// Name of the offending step.
        step: &'static str,
        /// The rejected sample.
        got: Sample,
    },
    /// A custom step failed for its own reasons.
    #[error("step failed: {0}")]
    Failed(String),
}

/// Build-time description of pipeline contents.
///
/// The closed variant set replaces inspect-the-value dispatch: a spec is a
/// step, an ordered sequence of specs, or a whole pipeline to splice in.
pub enum PipelineSpec {
    /// A single transform.
    Step(Box<dyn Step>),
    /// An ordered sequence, flattened in place.
    Seq(Vec<PipelineSpec>),
    /// Another pipeline, spliced step-for-step.
    Sub(Pipeline),
}

impl PipelineSpec {
    /// Wrap a transform as a spec.
    pub fn step(step: impl Step + 'static) -> Self {
        PipelineSpec::Step(Box::new(step))
    }

    // Depth-first, left-to-right expansion into a flat step list.
    fn flatten_into(self, steps: &mut Vec<Box<dyn Step>>) {
        match self {
            PipelineSpec::Step(s) => steps.push(s),
            PipelineSpec::Seq(items) => {
                for item in items {
                    item.flatten_into(steps);
                }
            }
            PipelineSpec::Sub(pipeline) => steps.extend(pipeline.steps),
        }
    }
}

impl From<Pipeline> for PipelineSpec {
    fn from(p: Pipeline) -> Self {
        PipelineSpec::Sub(p)
    }
}

impl From<Vec<PipelineSpec>> for PipelineSpec {
    fn from(items: Vec<PipelineSpec>) -> Self {
        PipelineSpec::Seq(items)
    }
}

/// Ordered, pre-flattened sequence of transforms.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    /// A pipeline with no steps; `run` is the identity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a pipeline from specs, flattening all nesting.
    pub fn new<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = PipelineSpec>,
    {
        let mut p = Self::empty();
        p.append(specs);
        p
    }

    /// Flatten more specs onto the end. Mutates in place; chainable.
    pub fn append<I>(&mut self, specs: I) -> &mut Self
    where
        I: IntoIterator<Item = PipelineSpec>,
    {
        for spec in specs {
            spec.flatten_into(&mut self.steps);
        }
        self
    }

    /// Fold the steps over `value`, left to right.
    pub fn run(&mut self, value: Sample) -> Result<Sample, StepError> {
        let mut x = value;
        for step in &mut self.steps {
            x = step.apply(x)?;
        }
        Ok(x)
    }

    /// Number of (flattened) steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
