//! Declarative rule templates.

use std::fmt;

use loam_core::Symbol;
use smallvec::SmallVec;

/// The spatial extent of a rule's matcher/writer template pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// One cell: the rule anchor itself.
    Single,
    /// The full 3×3 neighborhood around the anchor.
    Full,
    /// A 3×1 column: the anchor plus the cells above and below.
    Vertical,
    /// A 1×3 row: the anchor plus the cells left and right.
    Horizontal,
    /// A 2×1 pair whose partner is above *or* below the anchor, chosen
    /// by coin flip on every attempt.
    SymmetricVertical,
    /// A 1×2 pair whose partner is left *or* right of the anchor, chosen
    /// by coin flip on every attempt.
    SymmetricHorizontal,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Single => "single",
            Self::Full => "3x3",
            Self::Vertical => "vertical 3x1",
            Self::Horizontal => "horizontal 1x3",
            Self::SymmetricVertical => "symmetric 2x1",
            Self::SymmetricHorizontal => "symmetric 1x2",
        };
        write!(f, "{name}")
    }
}

/// A spatial template of `T` in one of the six recognized shapes.
///
/// `Full` is addressed `[row][col]` top-to-bottom, left-to-right, with
/// the anchor at `[1][1]`. `Vertical` runs `[above, anchor, below]`,
/// `Horizontal` runs `[left, anchor, right]`. The symmetric shapes run
/// `[partner, anchor]`: the partner binds to either side of the anchor,
/// re-chosen uniformly at random on every attempt.
///
/// Unrecognized shapes are unrepresentable: there is no way to write a
/// template this engine cannot dispatch on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Template<T> {
    /// Single-cell template.
    Single(T),
    /// Full 3×3 template, `[row][col]`.
    Full([[T; 3]; 3]),
    /// Vertical 3×1 template, `[above, anchor, below]`.
    Vertical([T; 3]),
    /// Horizontal 1×3 template, `[left, anchor, right]`.
    Horizontal([T; 3]),
    /// Symmetric 2×1 template, `[partner, anchor]`.
    SymmetricVertical([T; 2]),
    /// Symmetric 1×2 template, `[partner, anchor]`.
    SymmetricHorizontal([T; 2]),
}

impl<T> Template<T> {
    /// The template's shape tag.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Single(_) => Shape::Single,
            Self::Full(_) => Shape::Full,
            Self::Vertical(_) => Shape::Vertical,
            Self::Horizontal(_) => Shape::Horizontal,
            Self::SymmetricVertical(_) => Shape::SymmetricVertical,
            Self::SymmetricHorizontal(_) => Shape::SymmetricHorizontal,
        }
    }

    /// Cells in accessor order: row-major for `Full`, declaration order
    /// for the line and pair shapes. Aligned with the shape's neighbor
    /// layout, slot for slot.
    pub(crate) fn cells(&self) -> SmallVec<[&T; 9]> {
        match self {
            Self::Single(c) => SmallVec::from_iter([c]),
            Self::Full(rows) => rows.iter().flatten().collect(),
            Self::Vertical(cs) | Self::Horizontal(cs) => cs.iter().collect(),
            Self::SymmetricVertical(cs) | Self::SymmetricHorizontal(cs) => cs.iter().collect(),
        }
    }
}

/// One cell of a matcher template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchCell {
    /// Don't care: this cell never vetoes the rule.
    Any,
    /// A pattern the cell's value must satisfy — a set of acceptable
    /// symbols, complemented by a leading `^`.
    Is(String),
}

impl MatchCell {
    /// Require the cell to match `pattern`.
    pub fn is(pattern: impl Into<String>) -> Self {
        Self::Is(pattern.into())
    }

    /// Require the cell *not* to match any symbol in `pattern`.
    pub fn not(pattern: impl AsRef<str>) -> Self {
        Self::Is(format!("^{}", pattern.as_ref()))
    }
}

impl From<&str> for MatchCell {
    fn from(pattern: &str) -> Self {
        Self::Is(pattern.to_string())
    }
}

/// One cell of a writer template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteCell {
    /// Don't care: leave the cell unchanged and unmarked.
    Keep,
    /// Write this literal symbol.
    Put(Symbol),
    /// Write the pre-commit value of the named neighbor accessor
    /// (`"c"`, `"s"`, `"a"`, ...). All writer sources are resolved
    /// before any cell is written, so two cells may swap through each
    /// other's accessors.
    Copy(String),
}

impl WriteCell {
    /// Copy from the named accessor.
    pub fn copy(accessor: impl Into<String>) -> Self {
        Self::Copy(accessor.into())
    }
}

impl From<Symbol> for WriteCell {
    fn from(symbol: Symbol) -> Self {
        Self::Put(symbol)
    }
}

/// One gate in a rule's condition list, evaluated left to right.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// A constant gate. `false` makes the rule inert; `true` is a no-op.
    Always(bool),
    /// A constant probability in `[0, 1]`, sampled independently on
    /// every attempt.
    Chance(f64),
    /// A symbolic expression over neighbor accessors, trait tables, and
    /// `count('..')`, re-evaluated on every attempt. A boolean result
    /// gates; a numeric result is sampled as a probability.
    Expr(String),
}

impl From<&str> for Condition {
    fn from(expr: &str) -> Self {
        Self::Expr(expr.to_string())
    }
}

/// A declarative rewrite rule: matcher template, writer template, and
/// optional conditions, all sharing one shape.
///
/// # Examples
///
/// A fall rule — anything denser than the cell below it swaps downward:
///
/// ```
/// use loam_rule::{Condition, MatchCell, Rule, Template, WriteCell};
///
/// let fall = Rule::new(
///     Template::Vertical([MatchCell::Any, MatchCell::is("~@"), MatchCell::Any]),
///     Template::Vertical([
///         WriteCell::Keep,
///         WriteCell::copy("s"),
///         WriteCell::copy("c"),
///     ]),
/// )
/// .when(Condition::Expr("density[c] > density[s]".into()));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    /// The matcher template.
    pub matcher: Template<MatchCell>,
    /// The writer template. Must share the matcher's shape.
    pub writer: Template<WriteCell>,
    /// Conditions, evaluated in order after the matcher gate.
    pub conditions: Vec<Condition>,
}

impl Rule {
    /// Pair a matcher template with a writer template.
    pub fn new(matcher: Template<MatchCell>, writer: Template<WriteCell>) -> Self {
        Self {
            matcher,
            writer,
            conditions: Vec::new(),
        }
    }

    /// Append a condition. Conditions run in the order added.
    pub fn when(mut self, condition: impl Into<Condition>) -> Self {
        self.conditions.push(condition.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_report_their_tag() {
        assert_eq!(Template::Single(MatchCell::Any).shape(), Shape::Single);
        assert_eq!(
            Template::SymmetricHorizontal([MatchCell::Any, MatchCell::Any]).shape(),
            Shape::SymmetricHorizontal
        );
    }

    #[test]
    fn full_cells_are_row_major() {
        let t = Template::Full([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let cells: Vec<i32> = t.cells().into_iter().copied().collect();
        assert_eq!(cells, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn not_prepends_negation() {
        assert_eq!(MatchCell::not("~@"), MatchCell::Is("^~@".into()));
    }

    #[test]
    fn when_accumulates_in_order() {
        let rule = Rule::new(
            Template::Single(MatchCell::is("~")),
            Template::Single(WriteCell::Put('.')),
        )
        .when(Condition::Chance(0.5))
        .when("count('~') > 2");
        assert_eq!(rule.conditions.len(), 2);
        assert_eq!(rule.conditions[1], Condition::Expr("count('~') > 2".into()));
    }
}
