//! Compatibility knowledge base
//!
//! Two read-only lookup tables map detected features to the earliest Node.js
//! version supporting them unconditionally: one for global/API identifiers
//! (bare, dotted, or prototype-method names), one for the fixed set of
//! language-syntax features. The dataset is embedded at compile time;
//! building it from the upstream corpus is out of scope.

pub mod feature;
pub mod index;
pub mod records;
pub mod version;

pub use feature::{FeatureId, SyntaxFeature};
pub use index::CompatIndex;
pub use records::{unflagged_version, CompatData, SupportEntry};
pub use version::NodeVersion;
