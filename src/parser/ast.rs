// AST (Abstract Syntax Tree) definitions for the expression language

use std::fmt;

/// Source location information for error reporting
///
/// `line` and `column` are 1-based; `offset` is the 0-based byte offset from
/// the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The location of the first character of any input.
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// The location just past `text`, when `text` starts here.
    pub fn advanced_over(self, text: &str) -> Self {
        text.chars().fold(self, |loc, ch| {
            if ch == '\n' {
                Self::new(loc.offset + 1, loc.line + 1, 1)
            } else {
                Self::new(loc.offset + ch.len_utf8(), loc.line, loc.column + 1)
            }
        })
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.line, self.column)
    }
}

/// Leaf payload of a [`Node`].
///
/// The default value is an empty word, which the parser substitutes wherever a
/// value was expected but could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Word(String),
    Operator(String),
    String(String),
    Integer(i64),
}

impl Value {
    pub fn placeholder() -> Self {
        Value::Word(String::new())
    }

    pub fn as_operator(&self) -> Option<&str> {
        match self {
            Value::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Value::Word(w) => Some(w),
            _ => None,
        }
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.as_operator() == Some(op)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::placeholder()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Word(w) => write!(f, "{}", w),
            Value::Operator(op) => write!(f, "{}", op),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// Index of a node inside its [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Operator tag of the transparent node wrapping a parenthesized expression.
pub const GROUP_OPERATOR: &str = "()";

/// Operator tag of the binary node produced by `a[i]`.
pub const INDEX_OPERATOR: &str = "[]";

/// A single tree element.
///
/// How `parens` is read depends on `primary`: an operator with two entries is
/// an infix application, an operator with one entry is a prefix application
/// (or a [`GROUP_OPERATOR`] grouping), anything else with `parens` present is
/// a call-style argument list. `braces` is a statement block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub primary: Value,
    pub parens: Option<Vec<NodeId>>,
    pub braces: Option<Vec<NodeId>>,
    /// Syntactic parent. Informational only; ownership flows through
    /// `parens`/`braces`.
    pub parent: Option<NodeId>,
    pub location: SourceLocation,
}

impl Node {
    pub fn new(primary: Value, parent: Option<NodeId>, location: SourceLocation) -> Self {
        Node {
            primary,
            parens: None,
            braces: None,
            parent,
            location,
        }
    }

    /// Infix operator node: operator primary with exactly two paren children.
    pub fn is_binary(&self) -> bool {
        matches!(self.primary, Value::Operator(_))
            && self.parens.as_ref().is_some_and(|p| p.len() == 2)
    }

    /// Prefix operator node, including grouping nodes.
    pub fn is_prefix(&self) -> bool {
        matches!(self.primary, Value::Operator(_))
            && self.parens.as_ref().is_some_and(|p| p.len() == 1)
    }

    pub fn is_group(&self) -> bool {
        self.is_prefix() && self.primary.is_operator(GROUP_OPERATOR)
    }

    /// Left and right operands of an infix node.
    pub fn operands(&self) -> Option<(NodeId, NodeId)> {
        if !self.is_binary() {
            return None;
        }
        self.parens.as_ref().map(|p| (p[0], p[1]))
    }
}

/// Parsed forest. Nodes live in one arena and are released together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ast {
    pub(crate) nodes: Vec<Node>,
    pub(crate) roots: Vec<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    /// One node per top-level statement, in source order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Paren children followed by brace children.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let node = self.node(id);
        node.parens
            .iter()
            .flatten()
            .chain(node.braces.iter().flatten())
            .copied()
    }

    /// Walks the parent back-references up to the root, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).parent, move |p| self.node(*p).parent)
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.0].parent = Some(parent);
    }
}
