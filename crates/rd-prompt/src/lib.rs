//! rd-prompt: Feedback tags → generator prompt
//!
//! Pipeline: Classifier → Composer → TextGenerator.
//! Classification and composition are pure; only the generator talks to the
//! outside world.

pub mod classifier;
pub mod composer;
pub mod generator;
pub mod response;

#[cfg(feature = "testing")]
pub mod testing;

pub use composer::PromptPair;
pub use generator::{GenerationRequest, GeneratorError, SamplingParams, TextGenerator};

use rd_core::tag::{FeedbackTag, ReviewRequest};

/// Classify the raw tags and compose the prompt for `target_language`.
pub fn compile(tags: &[FeedbackTag], target_language: &str) -> (ReviewRequest, PromptPair) {
    let request = classifier::classify(tags);
    let prompt = composer::compose(&request, target_language);
    (request, prompt)
}
