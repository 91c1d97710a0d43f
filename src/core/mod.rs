//! Core functionality: classification, aggregation and run orchestration

pub mod aggregator;
pub mod classifier;
pub mod crawler;
pub mod engine;
pub mod recommend;
pub mod scanner;
pub mod scope;
pub mod tokens;

pub use classifier::FeatureClassifier;
pub use crawler::DependencyCrawler;
pub use engine::Engine;
pub use recommend::recommend;
pub use scanner::PackageScanner;
pub use scope::ScopeSet;
pub use tokens::TokenTable;
