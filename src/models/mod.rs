pub mod analysis;
pub mod document;
pub mod highlights;
pub mod loaders;

pub use analysis::{AnalysisResult, AnalysisSummary, Project, RelevantProject, SkillsOnly};
pub use document::Document;
pub use highlights::{HighlightsSummary, ProjectHighlights};
pub use loaders::load_document;
