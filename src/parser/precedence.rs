//! Operator precedence table
//!
//! The grammar itself is flat: operators are chained strictly left to right and
//! the tree is repaired afterwards (see `expressions`). This table supplies the
//! ranking used by that repair. It is built once and never mutated, so any
//! number of parsers may consult it concurrently.

use super::ast::INDEX_OPERATOR;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// Binding strength, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Assignment,
    /// Operators missing from the table
    Other,
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Member,
}

static TABLE: LazyLock<FxHashMap<&'static str, Precedence>> = LazyLock::new(|| {
    use Precedence::*;

    let mut table = FxHashMap::default();
    insert_all(
        &mut table,
        Assignment,
        &["=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>="],
    );
    insert_all(&mut table, LogicalOr, &["||"]);
    insert_all(&mut table, LogicalAnd, &["&&"]);
    insert_all(&mut table, BitOr, &["|"]);
    insert_all(&mut table, BitXor, &["^"]);
    insert_all(&mut table, BitAnd, &["&"]);
    insert_all(&mut table, Equality, &["==", "!="]);
    insert_all(&mut table, Relational, &["<", "<=", ">", ">="]);
    insert_all(&mut table, Shift, &["<<", ">>"]);
    insert_all(&mut table, Additive, &["+", "-"]);
    insert_all(&mut table, Multiplicative, &["*", "/", "%"]);
    insert_all(&mut table, Member, &[".", "->", "::", INDEX_OPERATOR]);
    table
});

fn insert_all(
    table: &mut FxHashMap<&'static str, Precedence>,
    rank: Precedence,
    ops: &[&'static str],
) {
    for op in ops {
        table.insert(*op, rank);
    }
}

impl Precedence {
    pub fn of(op: &str) -> Precedence {
        TABLE.get(op).copied().unwrap_or(Precedence::Other)
    }
}

/// Assignment-family operators parse their right side with trailing
/// operators allowed, which makes them right-associative.
pub fn is_assignment(op: &str) -> bool {
    Precedence::of(op) == Precedence::Assignment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Precedence::of("*") > Precedence::of("+"));
        assert!(Precedence::of("+") > Precedence::of("<<"));
        assert!(Precedence::of("<") > Precedence::of("=="));
        assert!(Precedence::of("&&") > Precedence::of("||"));
        assert!(Precedence::of("||") > Precedence::of("="));
        assert!(Precedence::of(".") > Precedence::of("*"));
        assert_eq!(Precedence::of("[]"), Precedence::Member);
    }

    #[test]
    fn test_unknown_operator_ranks_above_assignment() {
        assert_eq!(Precedence::of(":"), Precedence::Other);
        assert!(Precedence::of(":") > Precedence::of("="));
        assert!(Precedence::of(":") < Precedence::of("||"));
    }

    #[test]
    fn test_assignment_family() {
        assert!(is_assignment("="));
        assert!(is_assignment("<<="));
        assert!(!is_assignment("=="));
        assert!(!is_assignment("<="));
    }
}
