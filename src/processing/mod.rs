//! Text processing: normalization, skill extraction and comparison

pub mod text_processor;
pub mod skills;
pub mod comparator;

pub use comparator::{compare, ComparisonResult, SkillComparator};
pub use skills::{SkillCategory, SkillDictionary, SkillExtractor, SkillSet};
pub use text_processor::{normalize_whitespace, NormalizedText};
