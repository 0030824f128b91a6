// Skill/experience alignment engine.
// normalize → alignment (+ transferable) → scoring → evaluator.
// The engine itself is pure; LLM access is confined to `supplier` and `explain`.

pub mod alignment;
pub mod evaluator;
pub mod explain;
pub mod handlers;
pub mod normalize;
pub mod prompts;
pub mod scoring;
pub mod supplier;
pub mod transferable;
