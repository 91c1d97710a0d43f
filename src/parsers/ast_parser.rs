//! Source parsing over OXC
//!
//! Parses one file, extracts the module-level metadata the classifier needs,
//! runs classification while the allocator is alive, and hands back an owned
//! token table so no AST lifetime escapes.

use crate::compat::CompatIndex;
use crate::core::classifier::FeatureClassifier;
use crate::core::tokens::TokenTable;
use crate::error::{AutocompatError, Result};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;
use parking_lot::Mutex;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Thread-safe allocator pool for reuse across parses.
/// A Mutex rather than an RwLock: allocators are handed out exclusively,
/// and Mutex only needs the payload to be Send, which keeps the pool
/// shareable across the rayon fan-out.
pub struct AllocatorPool {
    allocators: Arc<Mutex<Vec<Allocator>>>,
}

impl AllocatorPool {
    /// Create a new allocator pool
    pub fn new(size: usize) -> Self {
        let mut allocators = Vec::with_capacity(size);
        for _ in 0..size {
            allocators.push(Allocator::default());
        }
        Self {
            allocators: Arc::new(Mutex::new(allocators)),
        }
    }

    /// Take an allocator from the pool
    pub fn take(&self) -> Option<Allocator> {
        self.allocators.lock().pop()
    }

    /// Return an allocator to the pool
    pub fn return_allocator(&self, allocator: Allocator) {
        self.allocators.lock().push(allocator);
    }
}

/// One import attribute entry on a static import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAttributeEntry {
    pub key: String,
    pub value: String,
}

/// One statically declared module request: import declarations and
/// re-exports with a source.
#[derive(Debug, Clone)]
pub struct StaticImport {
    pub source: String,
    pub attributes: Vec<ImportAttributeEntry>,
}

/// Module-level facts about one file, extracted before classification.
#[derive(Debug, Clone, Default)]
pub struct ModuleMetadata {
    /// Whether any import/export syntax is present.
    pub has_module_syntax: bool,
    pub static_imports: Vec<StaticImport>,
}

impl ModuleMetadata {
    /// Whether any static import carries a `type: "json"` attribute.
    pub fn has_json_import_attribute(&self) -> bool {
        self.static_imports.iter().any(|import| {
            import
                .attributes
                .iter()
                .any(|attr| attr.key == "type" && attr.value == "json")
        })
    }
}

/// Scan the top-level statements for module syntax and static module
/// requests. Imports and exports are syntactically top-level, so no deep
/// walk is needed here.
pub(crate) fn extract_metadata<'a>(program: &Program<'a>) -> ModuleMetadata {
    let mut metadata = ModuleMetadata::default();

    for stmt in &program.body {
        match stmt {
            Statement::ImportDeclaration(decl) => {
                metadata.has_module_syntax = true;

                let mut attributes = Vec::new();
                if let Some(with_clause) = &decl.with_clause {
                    for entry in &with_clause.with_entries {
                        let key = match &entry.key {
                            ImportAttributeKey::Identifier(ident) => ident.name.to_string(),
                            ImportAttributeKey::StringLiteral(literal) => {
                                literal.value.to_string()
                            }
                        };
                        attributes.push(ImportAttributeEntry {
                            key,
                            value: entry.value.value.to_string(),
                        });
                    }
                }

                metadata.static_imports.push(StaticImport {
                    source: decl.source.value.as_str().to_string(),
                    attributes,
                });
            }
            Statement::ExportNamedDeclaration(decl) => {
                metadata.has_module_syntax = true;
                if let Some(source) = &decl.source {
                    metadata.static_imports.push(StaticImport {
                        source: source.value.as_str().to_string(),
                        attributes: Vec::new(),
                    });
                }
            }
            Statement::ExportAllDeclaration(decl) => {
                metadata.has_module_syntax = true;
                metadata.static_imports.push(StaticImport {
                    source: decl.source.value.as_str().to_string(),
                    attributes: Vec::new(),
                });
            }
            Statement::ExportDefaultDeclaration(_) => {
                metadata.has_module_syntax = true;
            }
            _ => {}
        }
    }

    metadata
}

/// Parser wrapper producing token tables from source files.
pub struct SourceParser {
    parse_options: ParseOptions,
    allocator_pool: AllocatorPool,
}

impl SourceParser {
    /// Create a new source parser
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions {
                parse_regular_expression: true,
                ..ParseOptions::default()
            },
            allocator_pool: AllocatorPool::new(num_cpus::get()),
        }
    }

    /// Parse a source file and classify it into a token table.
    ///
    /// A tree that cannot be produced is a per-file failure; the caller's
    /// policy decides whether to skip or abort.
    pub fn parse_and_classify(&self, path: &Path, index: &CompatIndex) -> Result<TokenTable> {
        let source_text = fs::read_to_string(path)
            .map_err(|e| AutocompatError::io_read_error(path, e))?;

        let source_type = Self::source_type_for(path);

        let allocator = self
            .allocator_pool
            .take()
            .unwrap_or_default();

        let result = {
            let ret = Parser::new(&allocator, &source_text, source_type)
                .with_options(self.parse_options.clone())
                .parse();

            if ret.errors.is_empty() {
                let metadata = extract_metadata(&ret.program);
                Ok(FeatureClassifier::classify(index, &ret.program, &metadata))
            } else {
                Err(AutocompatError::parse_failure(
                    path,
                    render_diagnostics(&ret.errors),
                ))
            }
        };

        self.allocator_pool.return_allocator(allocator);
        result
    }

    /// Pick the source type from the file extension. Plain `.js` parses as
    /// a module: virtually all CommonJS is valid module-grammar, while the
    /// reverse parse would reject every import statement.
    fn source_type_for(path: &Path) -> SourceType {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("cjs") => SourceType::cjs(),
            Some("jsx") => SourceType::jsx(),
            _ => SourceType::mjs(),
        }
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Render parser diagnostics into owned messages that outlive the AST.
fn render_diagnostics(errors: &[OxcDiagnostic]) -> Vec<String> {
    errors.iter().map(|error| format!("{}", error)).collect()
}
