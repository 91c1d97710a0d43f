//! Recommendation comparison against a declared engines constraint

use crate::compat::NodeVersion;
use crate::models::analysis::{Outcome, Recommendation};

/// Compute the recommended constraint and classify it against whatever the
/// manifest currently declares. Pure: writing the constraint back is the
/// caller's business and happens only after explicit confirmation.
pub fn recommend(
    dependency_version: NodeVersion,
    source_version: NodeVersion,
    declared: Option<&str>,
) -> Recommendation {
    let required = dependency_version.max(source_version);
    let constraint = format!(">={}", required);

    let outcome = match declared {
        Some(existing) if existing == constraint => Outcome::AlreadyOptimal,
        _ => Outcome::NeedsUpdate,
    };

    Recommendation { required, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> NodeVersion {
        text.parse().unwrap()
    }

    #[test]
    fn required_is_maximum_of_both_components() {
        let rec = recommend(v("20.0.0"), v("14.0.0"), None);
        assert_eq!(rec.required, v("20.0.0"));

        let rec = recommend(v("14.0.0"), v("20.0.0"), None);
        assert_eq!(rec.required, v("20.0.0"));
    }

    #[test]
    fn exact_constraint_is_already_optimal() {
        let rec = recommend(v("18.0.0"), v("14.0.0"), Some(">=18.0.0"));
        assert_eq!(rec.outcome, Outcome::AlreadyOptimal);
    }

    #[test]
    fn differing_constraint_needs_update() {
        let rec = recommend(v("18.0.0"), v("14.0.0"), Some(">=16.0.0"));
        assert_eq!(rec.outcome, Outcome::NeedsUpdate);
        // A caret range is not the exact `>=` form, so it also differs.
        let rec = recommend(v("18.0.0"), v("14.0.0"), Some("^18.0.0"));
        assert_eq!(rec.outcome, Outcome::NeedsUpdate);
    }

    #[test]
    fn missing_constraint_needs_update() {
        let rec = recommend(v("18.0.0"), v("14.0.0"), None);
        assert_eq!(rec.outcome, Outcome::NeedsUpdate);
        assert_eq!(rec.constraint(), ">=18.0.0");
    }
}
