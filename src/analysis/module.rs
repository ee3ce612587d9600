//! Module parsing using tree-sitter for JavaScript/TypeScript.
//!
//! Extracts the statically declared import specifiers and the exported
//! symbol names of a single source file. Only top-level `import` and
//! `export ... from` declarations count as imports; `require()` and dynamic
//! `import()` calls are ignored.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tree_sitter::{Node, Parser};

use crate::resolver::is_relative_specifier;

/// Errors that can occur while parsing a single module.
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse file: {path}")]
    Syntax { path: String },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Tree-sitter language initialization failed")]
    LanguageInit,
}

/// Result type for module parsing.
pub type ModuleResult<T> = Result<T, ModuleError>;

/// How a module dependency was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import ... from 'x'` or `import 'x'`
    Import,
    /// `export ... from 'x'` or `export * from 'x'`
    ReExport,
}

/// A statically declared module dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticImport {
    /// The specifier as written, without quotes.
    pub specifier: String,
    pub kind: ImportKind,
    /// Line number in the source file (1-indexed)
    pub line: usize,
}

impl StaticImport {
    /// Returns true if the specifier is a path rather than a package name.
    pub fn is_relative(&self) -> bool {
        is_relative_specifier(&self.specifier)
    }
}

/// Imports and exports found in one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Static imports in source order.
    pub imports: Vec<StaticImport>,
    /// Exported symbol names; `"default"` marks a default export.
    pub exports: BTreeSet<String>,
}

impl ModuleInfo {
    /// Imports whose specifier is a relative or absolute path.
    pub fn relative_imports(&self) -> impl Iterator<Item = &StaticImport> {
        self.imports.iter().filter(|i| i.is_relative())
    }

    pub fn has_default_export(&self) -> bool {
        self.exports.contains("default")
    }
}

/// Language type for file analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    TypeScript,
    Tsx,
    Jsx,
}

impl SourceLanguage {
    /// Determine language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "jsx" => Some(SourceLanguage::Jsx),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    /// Determine language from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Parser for extracting imports and exports from JavaScript/TypeScript files.
///
/// Holds one tree-sitter parser per grammar. A `ModuleParser` is not shared
/// between threads; create one per worker.
pub struct ModuleParser {
    js_parser: Parser,
    ts_parser: Parser,
    tsx_parser: Parser,
}

impl ModuleParser {
    /// Create a new ModuleParser.
    pub fn new() -> ModuleResult<Self> {
        let mut js_parser = Parser::new();
        js_parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|_| ModuleError::LanguageInit)?;

        let mut ts_parser = Parser::new();
        ts_parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|_| ModuleError::LanguageInit)?;

        let mut tsx_parser = Parser::new();
        tsx_parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .map_err(|_| ModuleError::LanguageInit)?;

        Ok(Self {
            js_parser,
            ts_parser,
            tsx_parser,
        })
    }

    /// Read and parse a single file.
    pub fn parse_file(&mut self, path: &Path) -> ModuleResult<ModuleInfo> {
        let language = SourceLanguage::from_path(path).ok_or_else(|| {
            ModuleError::UnsupportedFileType(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
        })?;

        let content = fs::read_to_string(path)?;
        self.parse_source(&content, language, path)
    }

    /// Parse source code directly.
    ///
    /// A tree containing syntax errors is rejected as a whole rather than
    /// partially trusted.
    pub fn parse_source(
        &mut self,
        source: &str,
        language: SourceLanguage,
        path: &Path,
    ) -> ModuleResult<ModuleInfo> {
        let parser = match language {
            SourceLanguage::JavaScript | SourceLanguage::Jsx => &mut self.js_parser,
            SourceLanguage::TypeScript => &mut self.ts_parser,
            SourceLanguage::Tsx => &mut self.tsx_parser,
        };

        let syntax_error = || ModuleError::Syntax {
            path: path.display().to_string(),
        };

        let tree = parser.parse(source, None).ok_or_else(syntax_error)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(syntax_error());
        }

        Ok(extract_module_info(&root, source))
    }
}

/// Walk the top-level statements of a program.
fn extract_module_info(root: &Node, source: &str) -> ModuleInfo {
    let mut info = ModuleInfo::default();
    let mut cursor = root.walk();

    for statement in root.named_children(&mut cursor) {
        match statement.kind() {
            "import_statement" => {
                if let Some(specifier) = source_specifier(&statement, source) {
                    info.imports.push(StaticImport {
                        specifier,
                        kind: ImportKind::Import,
                        line: statement.start_position().row + 1,
                    });
                }
            }
            "export_statement" => {
                if let Some(specifier) = source_specifier(&statement, source) {
                    info.imports.push(StaticImport {
                        specifier,
                        kind: ImportKind::ReExport,
                        line: statement.start_position().row + 1,
                    });
                }
                collect_exports(&statement, source, &mut info.exports);
            }
            _ => {}
        }
    }

    info
}

/// The `from '...'` string of an import or export statement.
fn source_specifier(statement: &Node, source: &str) -> Option<String> {
    let node = statement.child_by_field_name("source")?;
    let value = string_value(&node, source)?;
    (!value.is_empty()).then_some(value)
}

/// Collect the names an `export_statement` makes visible.
fn collect_exports(statement: &Node, source: &str, exports: &mut BTreeSet<String>) {
    if has_default_keyword(statement) {
        // `export default function foo() {}` exports only `default`.
        exports.insert("default".to_string());
        return;
    }

    let mut cursor = statement.walk();
    for child in statement.children(&mut cursor) {
        match child.kind() {
            "export_clause" => collect_clause_names(&child, source, exports),
            "namespace_export" => {
                // export * as ns from '...'
                let mut inner = child.walk();
                let name = child
                    .named_children(&mut inner)
                    .find_map(|n| export_name(&n, source));
                if let Some(name) = name {
                    exports.insert(name);
                }
            }
            _ => {}
        }
    }

    if let Some(declaration) = statement.child_by_field_name("declaration") {
        collect_declaration_names(&declaration, source, exports);
    }
}

fn has_default_keyword(statement: &Node) -> bool {
    let mut cursor = statement.walk();
    let found = statement.children(&mut cursor).any(|c| c.kind() == "default");
    found
}

/// `export { a, b as c }` exports `a` and `c`.
fn collect_clause_names(clause: &Node, source: &str, exports: &mut BTreeSet<String>) {
    let mut cursor = clause.walk();
    for specifier in clause.named_children(&mut cursor) {
        if specifier.kind() != "export_specifier" {
            continue;
        }
        let exported = specifier
            .child_by_field_name("alias")
            .or_else(|| specifier.child_by_field_name("name"));
        if let Some(name) = exported.and_then(|n| export_name(&n, source)) {
            exports.insert(name);
        }
    }
}

fn collect_declaration_names(declaration: &Node, source: &str, exports: &mut BTreeSet<String>) {
    match declaration.kind() {
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = declaration.walk();
            for declarator in declaration.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name) = declarator.child_by_field_name("name") {
                    collect_binding_names(&name, source, exports);
                }
            }
        }
        "ambient_declaration" => {
            // export declare const x: number;
            let mut cursor = declaration.walk();
            for inner in declaration.named_children(&mut cursor) {
                collect_declaration_names(&inner, source, exports);
            }
        }
        _ => {
            // function, class, interface, type alias, enum, namespace
            if let Some(name) = declaration.child_by_field_name("name") {
                if let Some(text) = node_text(&name, source) {
                    exports.insert(text.to_string());
                }
            }
        }
    }
}

/// Collect identifiers bound by a declarator name, including destructuring.
fn collect_binding_names(pattern: &Node, source: &str, exports: &mut BTreeSet<String>) {
    match pattern.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            if let Some(text) = node_text(pattern, source) {
                exports.insert(text.to_string());
            }
        }
        "pair_pattern" => {
            if let Some(value) = pattern.child_by_field_name("value") {
                collect_binding_names(&value, source, exports);
            }
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = pattern.child_by_field_name("left") {
                collect_binding_names(&left, source, exports);
            }
        }
        _ => {
            let mut cursor = pattern.walk();
            for child in pattern.named_children(&mut cursor) {
                collect_binding_names(&child, source, exports);
            }
        }
    }
}

/// An exported name is an identifier or, in newer syntax, a string literal.
fn export_name(node: &Node, source: &str) -> Option<String> {
    match node.kind() {
        "string" => string_value(node, source),
        _ => node_text(node, source).map(|s| s.to_string()),
    }
}

/// Extract the text content of a node.
fn node_text<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    source.get(node.start_byte()..node.end_byte())
}

/// Extract string value (removes quotes).
fn string_value(node: &Node, source: &str) -> Option<String> {
    let text = node_text(node, source)?;
    let trimmed = text
        .trim_start_matches(['"', '\'', '`'])
        .trim_end_matches(['"', '\'', '`']);
    Some(trimmed.to_string())
}
