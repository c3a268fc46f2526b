mod engine;

/// The four-term arrangement scoring function
pub mod score;

#[doc(inline)]
pub use engine::Arrangement;

#[doc(inline)]
pub use engine::RRGOptimizer;
