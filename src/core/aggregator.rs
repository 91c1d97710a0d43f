//! Hierarchical reduction of token tables
//!
//! Files merge into a package table, package versions reduce into one
//! dependency-wide version. Equal keys always carry equal versions, so both
//! operations are associative and commutative and any merge order yields the
//! same scalar.

use crate::compat::NodeVersion;
use crate::core::tokens::TokenTable;

/// Merge an ordered sequence of per-file tables into one group table.
pub fn merge_tables<I>(tables: I) -> TokenTable
where
    I: IntoIterator<Item = TokenTable>,
{
    let mut merged = TokenTable::new();
    for table in tables {
        merged.absorb(table);
    }
    merged
}

/// Reduce a group table to its minimum-supported-version scalar.
/// An empty group reduces to the zero baseline, not an error.
pub fn reduce_version(table: &TokenTable) -> NodeVersion {
    table.max_version()
}

/// Reduce a set of already-reduced versions (one per package) by maximum.
pub fn reduce_versions<I>(versions: I) -> NodeVersion
where
    I: IntoIterator<Item = NodeVersion>,
{
    versions.into_iter().max().unwrap_or(NodeVersion::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::{FeatureId, SyntaxFeature};

    fn v(text: &str) -> NodeVersion {
        text.parse().unwrap()
    }

    fn table(entries: &[(&str, &str)]) -> TokenTable {
        let mut table = TokenTable::new();
        for (name, version) in entries {
            table.insert(FeatureId::api(*name), v(version));
        }
        table
    }

    #[test]
    fn merge_is_commutative() {
        let a = table(&[("fetch", "18.0.0"), ("URL", "10.0.0")]);
        let b = table(&[("structuredClone", "17.0.0")]);
        let mut c = TokenTable::new();
        c.insert(FeatureId::Syntax(SyntaxFeature::OptionalChaining), v("14.0.0"));

        let orderings: [[&TokenTable; 3]; 6] = [
            [&a, &b, &c],
            [&a, &c, &b],
            [&b, &a, &c],
            [&b, &c, &a],
            [&c, &a, &b],
            [&c, &b, &a],
        ];

        let expected = merge_tables(orderings[0].iter().map(|t| (*t).clone()));
        for ordering in &orderings[1..] {
            let merged = merge_tables(ordering.iter().map(|t| (*t).clone()));
            assert_eq!(merged, expected);
            assert_eq!(reduce_version(&merged), reduce_version(&expected));
        }
        assert_eq!(reduce_version(&expected), v("18.0.0"));
    }

    #[test]
    fn empty_group_reduces_to_zero() {
        assert_eq!(merge_tables(std::iter::empty()).max_version(), NodeVersion::ZERO);
        assert_eq!(reduce_versions(std::iter::empty()), NodeVersion::ZERO);
    }

    #[test]
    fn package_versions_reduce_by_maximum() {
        let versions = vec![v("12.17.0"), v("20.0.0"), v("14.0.0")];
        assert_eq!(reduce_versions(versions), v("20.0.0"));
    }
}
