//! AST walk that records the import/export/constant rewrites of one module.

use std::path::Path;

use oxc_ast::ast::{
    Argument, AssignmentExpression, AssignmentOperator, AssignmentTarget, BindingPatternKind,
    CallExpression, Expression, ExpressionStatement, FunctionBody, Program, Statement,
    StaticBlock, VariableDeclaration,
};
use oxc_ast_visit::{Visit, walk};
use weld_gen::{GetSpan, LineIndex, SourceEdits, Span};

use crate::error::MergeError;
use crate::module::{ExtractedConstant, ImportBinding, Literal};
use crate::namespace::{import_binding_name, is_valid_identifier};
use crate::resolver::ModuleResolver;

const SNIPPET_LIMIT: usize = 80;

/// Where a `var`/`let`/`const` declaration sits in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Directly in the program body; literal declarators become constants.
    Root,
    /// An item of a nested statement list (block, function body, case).
    ListItem,
    /// The sole body of `if`, `else`, a loop or a label.
    Body,
    /// Inside another construct, such as a `for` initializer.
    Inline,
}

/// Collects span edits for a module body.
///
/// The first failure is kept and the walk stops recording once it is set.
pub(super) struct ModuleRewriter<'s, 'r> {
    path: &'r Path,
    resolver: &'r ModuleResolver,
    lines: LineIndex<'s>,
    pub(super) edits: SourceEdits<'s>,
    pub(super) dependencies: Vec<std::path::PathBuf>,
    pub(super) imports: Vec<ImportBinding>,
    pub(super) constants: Vec<ExtractedConstant>,
    pub(super) error: Option<MergeError>,
    function_depth: usize,
}

impl<'s, 'r> ModuleRewriter<'s, 'r> {
    pub(super) fn new(source: &'s str, path: &'r Path, resolver: &'r ModuleResolver) -> Self {
        Self {
            path,
            resolver,
            lines: LineIndex::new(source),
            edits: SourceEdits::new(source),
            dependencies: Vec::new(),
            imports: Vec::new(),
            constants: Vec::new(),
            error: None,
            function_depth: 0,
        }
    }

    /// Walk the top-level statements. Declarations directly in the program
    /// body are the only candidates for constant extraction.
    pub(super) fn rewrite_program(&mut self, program: &Program<'_>) {
        if let Some(hashbang) = &program.hashbang {
            self.edits.remove(hashbang.span);
        }

        for statement in &program.body {
            if self.error.is_some() {
                return;
            }
            match statement {
                Statement::VariableDeclaration(decl) => {
                    self.rewrite_declaration(decl, Placement::Root);
                }
                other => self.visit_statement(other),
            }
        }
    }

    fn fail(&mut self, error: MergeError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn snippet(&self, span: Span) -> String {
        let text = self.lines.slice(span);
        let first_line = text.lines().next().unwrap_or_default().trim();
        if first_line.chars().count() > SNIPPET_LIMIT {
            let cut: String = first_line.chars().take(SNIPPET_LIMIT).collect();
            format!("{cut}...")
        } else {
            first_line.to_string()
        }
    }

    fn unsupported_import(&mut self, span: Span, reason: impl Into<String>) {
        let error = MergeError::UnsupportedImport {
            path: self.path.to_path_buf(),
            location: self.lines.location(span.start),
            reason: reason.into(),
            snippet: self.snippet(span),
        };
        self.fail(error);
    }

    fn unsupported_export(&mut self, span: Span, reason: impl Into<String>) {
        let error = MergeError::UnsupportedExport {
            path: self.path.to_path_buf(),
            location: self.lines.location(span.start),
            reason: reason.into(),
            snippet: self.snippet(span),
        };
        self.fail(error);
    }

    /// Resolve a `require('<literal>')` call and record the import.
    ///
    /// Returns the binding name the call is replaced with.
    fn record_import(&mut self, call: &CallExpression<'_>) -> Option<String> {
        let specifier = match &call.arguments[..] {
            [Argument::StringLiteral(literal)] => literal.value.to_string(),
            [_] => {
                self.unsupported_import(call.span, "require argument must be a string literal");
                return None;
            }
            _ => {
                self.unsupported_import(call.span, "require takes exactly one argument");
                return None;
            }
        };

        let binding = import_binding_name(&specifier, self.resolver.extensions());
        if !is_valid_identifier(&binding) {
            self.unsupported_import(
                call.span,
                format!("'{specifier}' does not end in a valid identifier"),
            );
            return None;
        }

        let resolved = match self.resolver.resolve_import(&specifier, self.path) {
            Ok(resolved) => resolved,
            Err(error) => {
                self.fail(error);
                return None;
            }
        };

        tracing::trace!(specifier = %specifier, binding = %binding, "rewriting require");
        self.dependencies.push(resolved.clone());
        self.imports.push(ImportBinding {
            specifier,
            resolved,
            binding: binding.clone(),
        });
        Some(binding)
    }

    fn rewrite_declaration(&mut self, decl: &VariableDeclaration<'_>, placement: Placement) {
        let mut dropped = vec![false; decl.declarations.len()];

        for (index, declarator) in decl.declarations.iter().enumerate() {
            // defaults and computed keys in patterns may hide a require
            self.visit_binding_pattern(&declarator.id);
            if self.error.is_some() {
                return;
            }

            let name = match &declarator.id.kind {
                BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.as_str()),
                _ => None,
            };
            let Some(init) = &declarator.init else {
                continue;
            };

            if let Some(call) = as_require(init) {
                let Some(name) = name else {
                    self.unsupported_import(
                        declarator.span,
                        "require result must be bound to a plain identifier",
                    );
                    return;
                };
                let Some(binding) = self.record_import(call) else {
                    return;
                };
                if name == binding {
                    dropped[index] = true;
                } else {
                    self.edits.replace(call.span, binding);
                }
                continue;
            }

            let literal = if placement == Placement::Root {
                name.zip(literal_value(init))
            } else {
                None
            };
            match literal {
                Some((name, (value, span))) => {
                    self.constants.push(ExtractedConstant {
                        name: name.to_string(),
                        value,
                        raw: self.lines.slice(span).to_string(),
                    });
                    dropped[index] = true;
                }
                None => self.visit_expression(init),
            }

            if self.error.is_some() {
                return;
            }
        }

        self.remove_declarators(decl, &dropped, placement);
    }

    /// Delete dropped declarators along with the commas that joined them.
    ///
    /// A declaration that is the whole body of another statement leaves an
    /// empty statement behind so the following statement stays outside it.
    fn remove_declarators(
        &mut self,
        decl: &VariableDeclaration<'_>,
        dropped: &[bool],
        placement: Placement,
    ) {
        if dropped.iter().all(|d| *d) {
            if placement == Placement::Body {
                self.edits.replace(decl.span, ";");
            } else {
                self.edits.remove(decl.span);
            }
            return;
        }

        let declarators = &decl.declarations;
        let mut index = 0;
        while index < dropped.len() {
            if !dropped[index] {
                index += 1;
                continue;
            }
            let run_start = index;
            while index < dropped.len() && dropped[index] {
                index += 1;
            }
            let run_end = index - 1;

            let span = if index < declarators.len() {
                Span::new(declarators[run_start].span.start, declarators[index].span.start)
            } else {
                // run_start > 0: at least one declarator is kept
                Span::new(
                    declarators[run_start - 1].span.end,
                    declarators[run_end].span.end,
                )
            };
            self.edits.remove(span);
        }
    }

    /// Replace a `require` on the right of an assignment with its binding.
    ///
    /// Returns false when the right-hand side is not a require call.
    fn rewrite_assigned_require(&mut self, assign: &AssignmentExpression<'_>) -> bool {
        let Some(call) = as_require(&assign.right) else {
            return false;
        };
        let Some(binding) = self.record_import(call) else {
            return true;
        };

        if let AssignmentTarget::AssignmentTargetIdentifier(ident) = &assign.left {
            if ident.name.as_str() == binding {
                let error = MergeError::ImportAssignmentConflict {
                    path: self.path.to_path_buf(),
                    location: self.lines.location(assign.span.start),
                    binding,
                    snippet: self.snippet(assign.span),
                };
                self.fail(error);
                return true;
            }
        }

        self.edits.replace(call.span, binding);
        true
    }
}

impl<'a> Visit<'a> for ModuleRewriter<'_, '_> {
    fn visit_statements(&mut self, it: &oxc_allocator::Vec<'a, Statement<'a>>) {
        for statement in it {
            if self.error.is_some() {
                return;
            }
            match statement {
                Statement::VariableDeclaration(decl) => {
                    self.rewrite_declaration(decl, Placement::ListItem);
                }
                other => self.visit_statement(other),
            }
        }
    }

    /// Reached for list items through [`Self::visit_statements`] and for the
    /// single-statement bodies of `if`, loops and labels.
    fn visit_statement(&mut self, it: &Statement<'a>) {
        if self.error.is_some() {
            return;
        }
        match it {
            Statement::VariableDeclaration(decl) => self.rewrite_declaration(decl, Placement::Body),
            _ => walk::walk_statement(self, it),
        }
    }

    fn visit_function_body(&mut self, it: &FunctionBody<'a>) {
        self.function_depth += 1;
        walk::walk_function_body(self, it);
        self.function_depth -= 1;
    }

    fn visit_static_block(&mut self, it: &StaticBlock<'a>) {
        self.function_depth += 1;
        walk::walk_static_block(self, it);
        self.function_depth -= 1;
    }

    fn visit_variable_declaration(&mut self, it: &VariableDeclaration<'a>) {
        self.rewrite_declaration(it, Placement::Inline);
    }

    fn visit_expression_statement(&mut self, it: &ExpressionStatement<'a>) {
        if self.error.is_some() {
            return;
        }

        match &it.expression {
            Expression::AssignmentExpression(assign) if is_export_target(&assign.left) => {
                if self.function_depth > 0 {
                    self.unsupported_export(it.span, "export assignment inside a nested function");
                    return;
                }
                if assign.operator != AssignmentOperator::Assign {
                    self.unsupported_export(it.span, "export must be a plain `=` assignment");
                    return;
                }

                self.edits
                    .replace(Span::new(it.span.start, assign.right.span().start), "return ");
                if !self.rewrite_assigned_require(assign) {
                    self.visit_expression(&assign.right);
                }
            }
            Expression::CallExpression(call) if is_require_call(call) => {
                self.unsupported_import(
                    it.span,
                    "require result must be assigned or bound to a variable",
                );
            }
            _ => walk::walk_expression_statement(self, it),
        }
    }

    fn visit_assignment_expression(&mut self, it: &AssignmentExpression<'a>) {
        if self.error.is_some() {
            return;
        }

        if is_export_target(&it.left) {
            self.unsupported_export(it.span, "export assignment must be a direct statement");
            return;
        }

        if self.rewrite_assigned_require(it) {
            self.visit_assignment_target(&it.left);
        } else {
            walk::walk_assignment_expression(self, it);
        }
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if self.error.is_some() {
            return;
        }

        if is_require_call(it) {
            self.unsupported_import(
                it.span,
                "require call nested inside another expression",
            );
            return;
        }

        walk::walk_call_expression(self, it);
    }
}

fn is_require_call(call: &CallExpression<'_>) -> bool {
    matches!(&call.callee, Expression::Identifier(ident) if ident.name.as_str() == "require")
}

fn as_require<'e, 'a>(expr: &'e Expression<'a>) -> Option<&'e CallExpression<'a>> {
    match expr.without_parentheses() {
        Expression::CallExpression(call) if is_require_call(call) => Some(call),
        _ => None,
    }
}

/// `module.exports`, `module["exports"]` or the bare `exports` handle.
fn is_export_target(target: &AssignmentTarget<'_>) -> bool {
    match target {
        AssignmentTarget::AssignmentTargetIdentifier(ident) => ident.name.as_str() == "exports",
        AssignmentTarget::StaticMemberExpression(member) => {
            is_module_ident(&member.object) && member.property.name.as_str() == "exports"
        }
        AssignmentTarget::ComputedMemberExpression(member) => {
            is_module_ident(&member.object)
                && matches!(&member.expression, Expression::StringLiteral(lit) if lit.value.as_str() == "exports")
        }
        _ => false,
    }
}

fn is_module_ident(expr: &Expression<'_>) -> bool {
    matches!(expr, Expression::Identifier(ident) if ident.name.as_str() == "module")
}

/// Value and source span of a string, number or boolean literal.
fn literal_value(expr: &Expression<'_>) -> Option<(Literal, Span)> {
    match expr.without_parentheses() {
        Expression::StringLiteral(lit) => Some((Literal::Str(lit.value.to_string()), lit.span)),
        Expression::NumericLiteral(lit) => Some((Literal::Num(lit.value), lit.span)),
        Expression::BooleanLiteral(lit) => Some((Literal::Bool(lit.value), lit.span)),
        _ => None,
    }
}
