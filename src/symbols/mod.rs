//! Function table built from a parsed forest
//!
//! Functions are written as the word `fn` followed by a parameter list and a
//! body block:
//!
//! ```text
//! add = fn(a, b: int) { a + b }
//! fn(x) { x * 2 }              // anonymous
//! ```
//!
//! The table is a read-only view over the [`Ast`]: bodies are kept as node ids
//! into the same arena. Nested functions record the index of the function that
//! encloses them, found by walking parent back-references.

use crate::parser::ast::{Ast, NodeId, Value};
use crate::parser::diagnostic::Diagnostic;
use log::Level;
use rustc_hash::FxHashMap;

/// Word that introduces a function definition
pub const FUNCTION_KEYWORD: &str = "fn";

/// Separator between a parameter name and its type annotation
pub const TYPE_ANNOTATION: &str = ":";

/// A declared parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub ty: Option<String>,
}

/// A function definition found in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// `None` for anonymous functions
    pub name: Option<String>,
    pub parameters: Vec<Variable>,
    pub body: Vec<NodeId>,
    /// The `fn` node itself
    pub node: NodeId,
    /// Index of the enclosing function in the table
    pub enclosing: Option<usize>,
}

/// All function definitions, in source order
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: Vec<Function>,
    by_name: FxHashMap<String, usize>,
    by_node: FxHashMap<NodeId, usize>,
    diagnostics: Vec<Diagnostic>,
}

impl FunctionTable {
    /// Walk every node of `ast` in source order and record each definition.
    pub fn build(ast: &Ast) -> Self {
        let mut table = FunctionTable::default();

        let mut pending: Vec<NodeId> = ast.roots().iter().rev().copied().collect();
        while let Some(id) = pending.pop() {
            table.visit(ast, id);

            let children: Vec<NodeId> = ast.children(id).collect();
            pending.extend(children.into_iter().rev());
        }

        log::info!("found {} function definition(s)", table.functions.len());
        table
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Most recent definition with this name
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.by_name.get(name).map(|i| &self.functions[*i])
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn visit(&mut self, ast: &Ast, id: NodeId) {
        let node = ast.node(id);
        if node.primary.as_word() != Some(FUNCTION_KEYWORD) {
            return;
        }

        let (Some(params), Some(body)) = (&node.parens, &node.braces) else {
            self.warn("'fn' without a parameter list and body, skipping", ast, id);
            return;
        };

        let mut parameters = Vec::with_capacity(params.len());
        for param in params {
            match parameter(ast, *param) {
                Some(variable) => parameters.push(variable),
                None => self.warn("Unsupported parameter form, skipping", ast, *param),
            }
        }

        let enclosing = ast
            .ancestors(id)
            .find_map(|ancestor| self.by_node.get(&ancestor).copied());

        let function = Function {
            name: binding_name(ast, id),
            parameters,
            body: body.clone(),
            node: id,
            enclosing,
        };
        log::debug!(
            "function {} with {} parameter(s)",
            function.name.as_deref().unwrap_or("<anonymous>"),
            function.parameters.len()
        );

        let index = self.functions.len();
        if let Some(name) = &function.name {
            if self.by_name.insert(name.clone(), index).is_some() {
                self.warn(format!("Function '{}' redefined", name), ast, id);
            }
        }
        self.by_node.insert(id, index);
        self.functions.push(function);
    }

    fn warn(&mut self, message: impl Into<String>, ast: &Ast, id: NodeId) {
        self.diagnostics.push(Diagnostic::report(
            Level::Warn,
            message,
            ast.node(id).location,
        ));
    }
}

/// `name = fn(...) {...}` names the function after the assigned word.
fn binding_name(ast: &Ast, id: NodeId) -> Option<String> {
    let parent = ast.node(id).parent?;
    let assignment = ast.node(parent);
    if !assignment.primary.is_operator("=") {
        return None;
    }

    let (target, value) = assignment.operands()?;
    if value != id {
        return None;
    }
    ast.node(target).primary.as_word().map(str::to_string)
}

/// `name` or `name: type`
fn parameter(ast: &Ast, id: NodeId) -> Option<Variable> {
    let node = ast.node(id);
    match &node.primary {
        Value::Word(name) if node.parens.is_none() => Some(Variable {
            name: name.clone(),
            ty: None,
        }),
        Value::Operator(op) if op == TYPE_ANNOTATION => {
            let (name, ty) = node.operands()?;
            Some(Variable {
                name: ast.node(name).primary.as_word()?.to_string(),
                ty: Some(ast.node(ty).primary.as_word()?.to_string()),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::parse_all;

    fn table(source: &str) -> (Ast, FunctionTable) {
        let ast = parse_all(tokenize(source));
        let table = FunctionTable::build(&ast);
        (ast, table)
    }

    #[test]
    fn test_anonymous_function() {
        let (ast, table) = table("fn(a, b) { a + b }");
        assert_eq!(table.len(), 1);

        let f = &table.functions()[0];
        assert_eq!(f.name, None);
        assert_eq!(f.node, ast.roots()[0]);
        assert_eq!(
            f.parameters,
            vec![
                Variable { name: "a".to_string(), ty: None },
                Variable { name: "b".to_string(), ty: None },
            ]
        );
        assert_eq!(f.body.len(), 1);
    }

    #[test]
    fn test_named_function_with_types() {
        let (_, table) = table("add = fn(a: int, b: int) { a + b; }");
        let f = table.get("add").expect("add is defined");
        assert_eq!(f.parameters[1].name, "b");
        assert_eq!(f.parameters[1].ty.as_deref(), Some("int"));
    }

    #[test]
    fn test_nested_function_knows_enclosing() {
        let (_, table) = table("outer = fn() { inner = fn(x) { x }; inner(1) }");
        assert_eq!(table.len(), 2);

        let inner = table.get("inner").expect("inner is defined");
        assert_eq!(inner.enclosing, Some(0));
        assert_eq!(table.get("outer").map(|f| f.enclosing), Some(None));
    }

    #[test]
    fn test_fn_without_body_is_skipped() {
        let (_, table) = table("fn(a); x = fn");
        assert!(table.is_empty());
        assert_eq!(table.diagnostics().len(), 2);
    }

    #[test]
    fn test_redefinition_keeps_latest() {
        let (_, table) = table("f = fn() { 1 }; f = fn(x) { 2 }");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("f").map(|f| f.parameters.len()), Some(1));
        assert_eq!(table.diagnostics().len(), 1);
    }

    #[test]
    fn test_bad_parameter_is_skipped() {
        let (_, table) = table("fn(a, 1 + 2, c) { }");
        let f = &table.functions()[0];
        assert_eq!(f.parameters.len(), 2);
        assert_eq!(table.diagnostics().len(), 1);
    }
}
