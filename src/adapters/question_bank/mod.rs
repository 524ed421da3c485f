//! Question bank adapters - sources of the elicitation reference data.

mod default_catalog;
mod yaml_catalog;

pub use default_catalog::default_catalog;
pub use yaml_catalog::YamlQuestionSource;
