//! Module transformer.
//!
//! Turns one CommonJS file into a namespacing declaration:
//!
//! ```text
//! var <namespace> = (function () {
//!   <body, with requires replaced by namespace names and the export
//!    assignment turned into `return`>
//! })();
//! ```
//!
//! Top-level literal declarations are lifted out and returned alongside the
//! printed program so the assembler can emit them once for all modules.

mod rewriter;

use std::fs;
use std::path::Path;

use weld_gen::{Allocator, ParseOptions, PrintOptions, parse, reprint};

use crate::error::{MergeError, Result};
use crate::module::ModuleRecord;
use crate::namespace::derive_namespace;
use crate::resolver::ModuleResolver;

use rewriter::ModuleRewriter;

/// Read, rewrite and print the module at `path`.
///
/// `path` must already be resolved; its dependencies are resolved relative
/// to it.
pub fn transform_module(
    path: &Path,
    resolver: &ModuleResolver,
    print: &PrintOptions,
) -> Result<ModuleRecord> {
    let source = fs::read_to_string(path).map_err(|source| MergeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    transform_source(path, &source, resolver, print)
}

/// Transform already-loaded module text.
pub fn transform_source(
    path: &Path,
    source: &str,
    resolver: &ModuleResolver,
    print: &PrintOptions,
) -> Result<ModuleRecord> {
    let namespace = derive_namespace(path, resolver.base_dir())?;

    let allocator = Allocator::default();
    let parsed = parse(&allocator, source, ParseOptions::default())
        .map_err(|err| MergeError::from_gen(path, err))?;

    let mut rewriter = ModuleRewriter::new(source, path, resolver);
    rewriter.rewrite_program(parsed.ast());
    if let Some(error) = rewriter.error.take() {
        return Err(error);
    }

    let body = rewriter
        .edits
        .apply()
        .map_err(|err| MergeError::from_gen(path, err))?;
    let wrapped = wrap_in_namespace(&namespace, &body);
    let program = reprint(&wrapped, print).map_err(|err| MergeError::Codegen {
        path: path.to_path_buf(),
        source: err,
    })?;

    tracing::debug!(
        path = %path.display(),
        namespace = %namespace,
        dependencies = rewriter.dependencies.len(),
        constants = rewriter.constants.len(),
        "transformed module"
    );

    Ok(ModuleRecord {
        path: path.to_path_buf(),
        namespace,
        program,
        dependencies: rewriter.dependencies,
        imports: rewriter.imports,
        constants: rewriter.constants,
        layer: 0,
    })
}

fn wrap_in_namespace(namespace: &str, body: &str) -> String {
    format!("var {namespace} = (function () {{\n{body}\n}})();\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Literal;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        resolver: ModuleResolver,
    }

    impl Fixture {
        fn new(files: &[(&str, &str)]) -> Self {
            let dir = TempDir::new().unwrap();
            for (name, contents) in files {
                let path = dir.path().join(name);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).unwrap();
                }
                fs::write(path, contents).unwrap();
            }
            let resolver = ModuleResolver::new(dir.path(), &[".js".to_string()]).unwrap();
            Self {
                _dir: dir,
                resolver,
            }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.resolver.base_dir().join(name)
        }

        fn transform(&self, name: &str) -> Result<ModuleRecord> {
            transform_module(&self.path(name), &self.resolver, &PrintOptions::default())
        }
    }

    #[test]
    fn test_wraps_and_returns_export() {
        let fx = Fixture::new(&[("leaf.js", "function leaf(v) { return v; }\nmodule.exports = leaf;\n")]);
        let record = fx.transform("leaf.js").unwrap();

        assert_eq!(record.namespace, "leaf");
        assert!(record.program.starts_with("var leaf = "));
        assert!(record.program.contains("function"));
        assert!(record.program.contains("return leaf;"));
        assert!(!record.program.contains("module.exports"));
        assert!(record.dependencies.is_empty());
    }

    #[test]
    fn test_require_with_matching_name_is_removed() {
        let fx = Fixture::new(&[
            ("leaf.js", "module.exports = 1;"),
            ("mid.js", "var leaf = require('./leaf');\nmodule.exports = function () { return leaf; };\n"),
        ]);
        let record = fx.transform("mid.js").unwrap();

        assert_eq!(record.dependencies, vec![fx.path("leaf.js")]);
        assert!(!record.program.contains("require"));
        assert!(!record.program.contains("var leaf"));
        assert!(record.program.contains("return leaf;"));
        assert_eq!(record.imports[0].binding, "leaf");
    }

    #[test]
    fn test_require_with_other_name_is_aliased() {
        let fx = Fixture::new(&[
            ("_baseMap.js", "module.exports = 1;"),
            ("map.js", "var baseMap = require('./_baseMap');\nmodule.exports = baseMap;\n"),
        ]);
        let record = fx.transform("map.js").unwrap();
        assert!(record.program.contains("var baseMap = _baseMap;"));
    }

    #[test]
    fn test_partial_declarator_removal() {
        let fx = Fixture::new(&[
            ("a.js", "module.exports = 1;"),
            ("b.js", "module.exports = 2;"),
            ("m.js", "var a = require('./a'), x = a + 1, b = require('./b');\nmodule.exports = x + b;\n"),
        ]);
        let record = fx.transform("m.js").unwrap();
        assert!(record.program.contains("var x = a + 1;"));
        assert_eq!(record.dependencies.len(), 2);
    }

    #[test]
    fn test_assignment_require_is_rewritten() {
        let fx = Fixture::new(&[
            ("leaf.js", "module.exports = 1;"),
            ("m.js", "var x;\nx = require('./leaf');\nmodule.exports = require('./leaf');\n"),
        ]);
        let record = fx.transform("m.js").unwrap();
        assert!(record.program.contains("x = leaf;"));
        assert!(record.program.contains("return leaf;"));
        assert_eq!(record.dependencies.len(), 2);
    }

    #[test]
    fn test_assignment_to_same_name_conflicts() {
        let fx = Fixture::new(&[
            ("leaf.js", "module.exports = 1;"),
            ("m.js", "var leaf;\nleaf = require('./leaf');\nmodule.exports = leaf;\n"),
        ]);
        let err = fx.transform("m.js").unwrap_err();
        assert!(matches!(err, MergeError::ImportAssignmentConflict { ref binding, .. } if binding == "leaf"));
    }

    #[test]
    fn test_top_level_literals_are_extracted() {
        let fx = Fixture::new(&[(
            "c.js",
            "var VERSION = '4.17.21', MAX = 200, FLAG = true;\nfunction f() { var LOCAL = 1; return LOCAL; }\nif (true) { var BLOCK = 2; }\nmodule.exports = f;\n",
        )]);
        let record = fx.transform("c.js").unwrap();

        let names: Vec<_> = record.constants.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["VERSION", "MAX", "FLAG"]);
        assert_eq!(record.constants[0].value, Literal::Str("4.17.21".into()));
        assert_eq!(record.constants[0].raw, "'4.17.21'");
        assert_eq!(record.constants[1].value, Literal::Num(200.0));
        assert!(!record.program.contains("VERSION"));
        assert!(record.program.contains("LOCAL = 1"));
        assert!(record.program.contains("BLOCK = 2"));
    }

    #[test]
    fn test_export_inside_block_returns() {
        let fx = Fixture::new(&[("m.js", "if (typeof x == 'undefined') {\n  module.exports = 1;\n} else {\n  module.exports = 2;\n}\n")]);
        let record = fx.transform("m.js").unwrap();
        assert!(record.program.contains("return 1;"));
        assert!(record.program.contains("return 2;"));
    }

    #[test]
    fn test_export_in_expression_position_fails() {
        let fx = Fixture::new(&[("m.js", "var ok = true;\nok ? module.exports = 1 : null;\n")]);
        let err = fx.transform("m.js").unwrap_err();
        match err {
            MergeError::UnsupportedExport { reason, location, .. } => {
                assert_eq!(reason, "export assignment must be a direct statement");
                assert_eq!(location.line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_export_inside_nested_function_fails() {
        let fx = Fixture::new(&[("m.js", "function init() {\n  module.exports = 1;\n}\ninit();\n")]);
        assert!(matches!(
            fx.transform("m.js"),
            Err(MergeError::UnsupportedExport { .. })
        ));
    }

    #[test]
    fn test_unsupported_require_shapes() {
        let cases = [
            "require('./leaf');",
            "var x = foo(require('./leaf'));",
            "var name = './leaf';\nvar x = require(name);",
            "var x = require('./leaf', 1);",
            "var { a } = require('./leaf');",
            "var o = {};\nvar { a = require('./leaf') } = o;\nmodule.exports = a;",
            "var o = {};\nvar { [require('./leaf')]: b } = o;",
        ];
        for source in cases {
            let fx = Fixture::new(&[("leaf.js", "module.exports = 1;"), ("m.js", source)]);
            let err = fx.transform("m.js").unwrap_err();
            assert!(
                matches!(err, MergeError::UnsupportedImport { .. }),
                "{source}: {err}"
            );
        }
    }

    #[test]
    fn test_dropped_declaration_keeps_statement_body() {
        let fx = Fixture::new(&[
            ("leaf.js", "module.exports = 1;"),
            ("m.js", "var c = false;\nif (c) var leaf = require('./leaf');\nmodule.exports = 2;\n"),
        ]);
        let record = fx.transform("m.js").unwrap();

        assert_eq!(record.dependencies, vec![fx.path("leaf.js")]);
        assert!(!record.program.contains("require"));
        assert!(record.program.lines().any(|line| line.trim() == "return 2;"));
    }

    #[test]
    fn test_dropped_declaration_in_block_is_removed() {
        let fx = Fixture::new(&[
            ("leaf.js", "module.exports = 1;"),
            ("m.js", "function f() {\n  var leaf = require('./leaf');\n  return leaf;\n}\nmodule.exports = f;\n"),
        ]);
        let record = fx.transform("m.js").unwrap();
        assert!(!record.program.contains("var leaf"));
        assert!(record.program.contains("return leaf;"));
    }

    #[test]
    fn test_bare_exports_handle() {
        let fx = Fixture::new(&[("m.js", "function f() {}\nexports = f;\n")]);
        let record = fx.transform("m.js").unwrap();
        assert!(record.program.contains("return f;"));
        assert!(!record.program.contains("exports"));
    }

    #[test]
    fn test_computed_module_exports() {
        let fx = Fixture::new(&[("m.js", "var v = {};\nmodule['exports'] = v;\n")]);
        let record = fx.transform("m.js").unwrap();
        assert!(record.program.contains("return v;"));
        assert!(!record.program.contains("module"));
    }

    #[test]
    fn test_compound_export_assignment_fails() {
        let fx = Fixture::new(&[("m.js", "var x = 1;\nmodule.exports += x;\n")]);
        match fx.transform("m.js").unwrap_err() {
            MergeError::UnsupportedExport { reason, location, .. } => {
                assert_eq!(reason, "export must be a plain `=` assignment");
                assert_eq!(location.line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unresolved_import() {
        let fx = Fixture::new(&[("m.js", "var missing = require('./missing');")]);
        assert!(matches!(
            fx.transform("m.js"),
            Err(MergeError::UnresolvedImport { .. })
        ));
    }

    #[test]
    fn test_parse_error_names_module() {
        let fx = Fixture::new(&[("m.js", "var = ;")]);
        let err = fx.transform("m.js").unwrap_err();
        assert!(matches!(err, MergeError::Parse { ref path, .. } if path.ends_with("m.js")));
    }

    #[test]
    fn test_directives_move_inside_and_hashbang_is_dropped() {
        let fx = Fixture::new(&[("m.js", "#!/usr/bin/env node\n'use strict';\nmodule.exports = 1;\n")]);
        let record = fx.transform("m.js").unwrap();
        assert!(!record.program.contains("#!"));
        let closure_start = record.program.find("function").unwrap();
        assert!(record.program.find("use strict").unwrap() > closure_start);
    }

    #[test]
    fn test_nested_directory_namespace() {
        let fx = Fixture::new(&[("fp/_baseConvert.js", "module.exports = 1;")]);
        let record = fx.transform("fp/_baseConvert.js").unwrap();
        assert_eq!(record.namespace, "fp__baseConvert");
        assert!(record.program.starts_with("var fp__baseConvert ="));
    }
}
