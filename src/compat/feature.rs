//! Feature identifiers for detected syntax constructs and API surfaces

use serde::Serialize;
use std::fmt;

/// The fixed set of language-syntax features the classifier can detect.
///
/// Each variant maps to a stable key in the knowledge base's syntax table.
/// The two node-protocol variants are distinct on purpose: the `node:`
/// specifier prefix landed in different Node.js releases for ESM and CJS
/// resolution, and keeping them apart preserves the token-table invariant
/// that one feature id always carries one version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SyntaxFeature {
    Esm,
    NodeProtocolEsm,
    NodeProtocolCjs,
    DynamicImport,
    ImportAttributes,
    Await,
    OptionalChaining,
    NullishCoalescing,
    TemplateLiteral,
    ClassDeclaration,
    PrivateIdentifier,
}

impl SyntaxFeature {
    pub const ALL: [SyntaxFeature; 11] = [
        SyntaxFeature::Esm,
        SyntaxFeature::NodeProtocolEsm,
        SyntaxFeature::NodeProtocolCjs,
        SyntaxFeature::DynamicImport,
        SyntaxFeature::ImportAttributes,
        SyntaxFeature::Await,
        SyntaxFeature::OptionalChaining,
        SyntaxFeature::NullishCoalescing,
        SyntaxFeature::TemplateLiteral,
        SyntaxFeature::ClassDeclaration,
        SyntaxFeature::PrivateIdentifier,
    ];

    /// Key of this feature in the knowledge base's syntax table.
    pub fn key(&self) -> &'static str {
        match self {
            SyntaxFeature::Esm => "esm",
            SyntaxFeature::NodeProtocolEsm => "node-protocol-esm",
            SyntaxFeature::NodeProtocolCjs => "node-protocol-cjs",
            SyntaxFeature::DynamicImport => "dynamic-import",
            SyntaxFeature::ImportAttributes => "import-attributes",
            SyntaxFeature::Await => "await",
            SyntaxFeature::OptionalChaining => "optional-chaining",
            SyntaxFeature::NullishCoalescing => "nullish-coalescing",
            SyntaxFeature::TemplateLiteral => "template-literals",
            SyntaxFeature::ClassDeclaration => "class-declaration",
            SyntaxFeature::PrivateIdentifier => "private-identifier",
        }
    }

    /// Human-readable name used in token tables and debug output.
    pub fn display_name(&self) -> &'static str {
        match self {
            SyntaxFeature::Esm => "ESM",
            SyntaxFeature::NodeProtocolEsm => "node: Protocol (esm)",
            SyntaxFeature::NodeProtocolCjs => "node: Protocol (cjs)",
            SyntaxFeature::DynamicImport => "DynamicImport",
            SyntaxFeature::ImportAttributes => "ImportAttributes",
            SyntaxFeature::Await => "AwaitExpression",
            SyntaxFeature::OptionalChaining => "OptionalChaining",
            SyntaxFeature::NullishCoalescing => "NullishCoalescing",
            SyntaxFeature::TemplateLiteral => "TemplateLiteral",
            SyntaxFeature::ClassDeclaration => "ClassDeclaration",
            SyntaxFeature::PrivateIdentifier => "PrivateIdentifier",
        }
    }
}

impl fmt::Display for SyntaxFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A detected construct: either a fixed syntax feature or a global/API
/// surface named by a bare identifier (`fetch`), a dotted pair
/// (`Object.hasOwn`) or a prototype method (`Array.prototype.toSorted`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureId {
    Syntax(SyntaxFeature),
    Api(String),
}

impl FeatureId {
    pub fn api(name: impl Into<String>) -> Self {
        FeatureId::Api(name.into())
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::Syntax(feature) => f.write_str(feature.display_name()),
            FeatureId::Api(name) => f.write_str(name),
        }
    }
}
