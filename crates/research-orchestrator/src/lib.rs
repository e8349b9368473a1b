pub mod config;
pub mod ingress;
pub mod pipeline;

#[cfg(test)]
mod pipeline_tests;

pub use config::OrchestratorConfig;
pub use ingress::normalize_mentions;
pub use pipeline::ResearchPipeline;
