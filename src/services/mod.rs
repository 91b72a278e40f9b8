pub mod enrichment;
pub mod llm_provider;
pub mod repository;
pub mod study;
