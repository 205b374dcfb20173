//! The slice of oxc the bundler needs: parse, find `require("...")` call
//! sites, swap their argument, print.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{Argument, CallExpression, Expression, Program};
use oxc_ast_visit::{walk, walk_mut, Visit, VisitMut};
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_span::{Atom, SourceType};

use crate::error::{BuildError, Result};

pub const REQUIRE: &str = "require";

pub fn parse_program<'a>(allocator: &'a Allocator, source: &'a str, path: &Path) -> Result<Program<'a>> {
    let source_type = SourceType::from_path(path).unwrap_or_default();
    let ret = Parser::new(allocator, source, source_type).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(BuildError::Parse {
            path: path.to_path_buf(),
            message,
        });
    }

    Ok(ret.program)
}

pub fn print_program(program: &Program<'_>) -> String {
    Codegen::new().build(program).code
}

fn is_require_call(call: &CallExpression<'_>) -> bool {
    matches!(&call.callee, Expression::Identifier(ident) if ident.name.as_str() == REQUIRE)
}

/// String arguments of every `require(...)` call, in source order.
///
/// Fails on the first call whose argument is not a plain string literal.
pub fn require_specifiers(program: &Program<'_>, path: &Path) -> Result<Vec<String>> {
    let mut collector = SpecifierCollector {
        specifiers: Vec::new(),
        dynamic: false,
    };
    collector.visit_program(program);

    if collector.dynamic {
        return Err(BuildError::DynamicSpecifier {
            path: path.to_path_buf(),
        });
    }
    Ok(collector.specifiers)
}

/// Replace the argument of each `require(...)` call with the matching entry of
/// `replacements`, visiting calls in the same order as [`require_specifiers`].
pub fn rewrite_require_specifiers<'a>(
    allocator: &'a Allocator,
    program: &mut Program<'a>,
    replacements: &[String],
) {
    let mut rewriter = SpecifierRewriter {
        allocator,
        replacements: replacements.iter(),
    };
    rewriter.visit_program(program);
}

struct SpecifierCollector {
    specifiers: Vec<String>,
    dynamic: bool,
}

impl<'a> Visit<'a> for SpecifierCollector {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if is_require_call(call) {
            match call.arguments.first() {
                Some(Argument::StringLiteral(lit)) => {
                    self.specifiers.push(lit.value.to_string());
                }
                _ => self.dynamic = true,
            }
        }
        walk::walk_call_expression(self, call);
    }
}

struct SpecifierRewriter<'a, 'r> {
    allocator: &'a Allocator,
    replacements: std::slice::Iter<'r, String>,
}

impl<'a> VisitMut<'a> for SpecifierRewriter<'a, '_> {
    fn visit_call_expression(&mut self, call: &mut CallExpression<'a>) {
        if is_require_call(call) {
            if let Some(Argument::StringLiteral(lit)) = call.arguments.first_mut() {
                if let Some(id) = self.replacements.next() {
                    let value: &'a str = self.allocator.alloc_str(id);
                    lit.value = Atom::from(value);
                    lit.raw = None;
                }
            }
        }
        walk_mut::walk_call_expression(self, call);
    }
}
