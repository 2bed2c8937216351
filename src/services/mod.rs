pub mod normalizer;
pub mod recommendations;

pub use normalizer::{enrich_highlights, normalize_analysis, normalize_multiple, parse_skills_only};
pub use recommendations::fallback_recommendations;
