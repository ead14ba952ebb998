//! # Column Predicates
//!
//! Single-column filters used to bound scans over key ranges. Every
//! predicate is normalized to one of four kinds:
//!
//! | Kind | Matches | Display |
//! |------|---------|---------|
//! | `Range` | `lower <= v < upper`, either bound optional | `` `c` >= 1 AND `c` < 5 `` |
//! | `Equality` | `v == value` | `` `c` = 3 `` |
//! | `IsNotNull` | any non-null value | `` `c` IS NOT NULL `` |
//! | `None` | nothing | `` `c` NONE `` |
//!
//! NULL never satisfies a predicate.
//!
//! ## Bound Conversion
//!
//! Ranges are half-open. Callers holding an inclusive upper bound (`v <= x`)
//! or an exclusive lower bound (`v > x`) convert it through the key
//! successor: `v <= x` is `v < succ(x)` and `v > x` is `v >= succ(x)`. When
//! `x` has no successor the bound is dropped or the predicate collapses:
//!
//! ```text
//! inclusive_range(None, Some(i8::MAX))   nullable     -> IsNotNull
//! inclusive_range(None, Some(i8::MAX))   not nullable -> no predicate
//! inclusive_range(Some(1), Some(i8::MAX))             -> Range [1, +inf)
//! exclusive_range(Some(i8::MAX), _)                   -> None
//! ```
//!
//! Bounds are `Copy` cells, so conversion works on a copy and the caller's
//! bound is never modified. Grown string bounds live in the arena.
//!
//! ## Simplification
//!
//! `range` normalizes on construction: an empty range (`lower >= upper`)
//! becomes `None`, and consecutive bounds (`upper == succ(lower)`) become
//! `Equality(lower)`.

use std::cmp::Ordering;
use std::fmt;

use eyre::{ensure, Result};

use crate::config::MAX_FIXED_SLOT_SIZE;
use crate::key::{are_consecutive, compare_cells, increment_cell};
use crate::memory::Arena;
use crate::types::{write_escaped, Cell, ColumnDef};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredicateKind<'a> {
    Range {
        lower: Option<Cell<'a>>,
        upper: Option<Cell<'a>>,
    },
    Equality(Cell<'a>),
    IsNotNull,
    None,
}

impl PredicateKind<'_> {
    /// Lower values are more selective.
    fn rank(&self) -> usize {
        match self {
            PredicateKind::None => 0,
            PredicateKind::Equality(_) => 1,
            PredicateKind::Range { .. } => 2,
            PredicateKind::IsNotNull => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPredicate<'a> {
    column: ColumnDef,
    kind: PredicateKind<'a>,
}

fn check_bound(column: &ColumnDef, bound: &Cell<'_>) -> Result<()> {
    ensure!(
        bound.data_type() == column.data_type(),
        "{} bound does not match column {} of type {}",
        bound.data_type(),
        column.name(),
        column.data_type()
    );
    Ok(())
}

impl<'a> ColumnPredicate<'a> {
    /// Half-open range `[lower, upper)`, simplified on construction.
    ///
    /// # Panics
    ///
    /// Panics if both bounds are absent.
    pub fn range(column: ColumnDef, lower: Option<Cell<'a>>, upper: Option<Cell<'a>>) -> Result<Self> {
        assert!(
            lower.is_some() || upper.is_some(),
            "range predicate on {} needs at least one bound",
            column.name()
        );
        for bound in lower.iter().chain(upper.iter()) {
            check_bound(&column, bound)?;
        }
        let mut pred = Self {
            column,
            kind: PredicateKind::Range { lower, upper },
        };
        pred.simplify()?;
        Ok(pred)
    }

    /// Range with an inclusive upper bound: `lower <= v <= upper`.
    ///
    /// Returns `Ok(None)` when the predicate would match every value of a
    /// non-nullable column.
    pub fn inclusive_range(
        column: ColumnDef,
        lower: Option<Cell<'a>>,
        upper: Option<Cell<'a>>,
        arena: &'a Arena,
    ) -> Result<Option<Self>> {
        assert!(
            lower.is_some() || upper.is_some(),
            "range predicate on {} needs at least one bound",
            column.name()
        );

        let mut exclusive_upper = None;
        if let Some(mut bound) = upper {
            check_bound(&column, &bound)?;
            if increment_cell(&mut bound, arena)? {
                exclusive_upper = Some(bound);
            } else if lower.is_none() {
                if column.is_nullable() {
                    return Ok(Some(Self::is_not_null(column)));
                }
                return Ok(None);
            }
        }

        Self::range(column, lower, exclusive_upper).map(Some)
    }

    /// Range with an exclusive lower bound: `lower < v < upper`.
    pub fn exclusive_range(
        column: ColumnDef,
        lower: Option<Cell<'a>>,
        upper: Option<Cell<'a>>,
        arena: &'a Arena,
    ) -> Result<Self> {
        assert!(
            lower.is_some() || upper.is_some(),
            "range predicate on {} needs at least one bound",
            column.name()
        );

        let mut inclusive_lower = None;
        if let Some(mut bound) = lower {
            check_bound(&column, &bound)?;
            if !increment_cell(&mut bound, arena)? {
                return Ok(Self::none(column));
            }
            inclusive_lower = Some(bound);
        }

        Self::range(column, inclusive_lower, upper)
    }

    pub fn equality(column: ColumnDef, value: Cell<'a>) -> Result<Self> {
        check_bound(&column, &value)?;
        Ok(Self {
            column,
            kind: PredicateKind::Equality(value),
        })
    }

    /// # Panics
    ///
    /// Panics if the column is not nullable.
    pub fn is_not_null(column: ColumnDef) -> Self {
        assert!(
            column.is_nullable(),
            "IS NOT NULL predicate on non-nullable column {}",
            column.name()
        );
        Self {
            column,
            kind: PredicateKind::IsNotNull,
        }
    }

    pub fn none(column: ColumnDef) -> Self {
        Self {
            column,
            kind: PredicateKind::None,
        }
    }

    pub fn column(&self) -> &ColumnDef {
        &self.column
    }

    pub fn kind(&self) -> &PredicateKind<'a> {
        &self.kind
    }

    fn set_to_none(&mut self) {
        self.kind = PredicateKind::None;
    }

    fn simplify(&mut self) -> Result<()> {
        if let PredicateKind::Range {
            lower: Some(lower),
            upper: Some(upper),
        } = self.kind
        {
            if compare_cells(&lower, &upper)? != Ordering::Less {
                self.set_to_none();
            } else if are_consecutive(&lower, &upper) {
                self.kind = PredicateKind::Equality(lower);
            }
        }
        Ok(())
    }

    /// Narrows `self` to the intersection of both predicates.
    pub fn merge(&mut self, other: &ColumnPredicate<'a>) -> Result<()> {
        ensure!(
            self.column.name() == other.column.name()
                && self.column.data_type() == other.column.data_type(),
            "cannot merge predicate on {} with predicate on {}",
            self.column.name(),
            other.column.name()
        );

        match self.kind {
            PredicateKind::None => Ok(()),
            PredicateKind::IsNotNull => {
                self.kind = other.kind;
                Ok(())
            }
            PredicateKind::Range { lower, upper } => self.merge_into_range(lower, upper, &other.kind),
            PredicateKind::Equality(value) => self.merge_into_equality(value, &other.kind),
        }
    }

    fn merge_into_range(
        &mut self,
        lower: Option<Cell<'a>>,
        upper: Option<Cell<'a>>,
        other: &PredicateKind<'a>,
    ) -> Result<()> {
        match *other {
            PredicateKind::None => self.set_to_none(),
            PredicateKind::IsNotNull => {}
            PredicateKind::Range {
                lower: other_lower,
                upper: other_upper,
            } => {
                let lower = match (lower, other_lower) {
                    (Some(a), Some(b)) if compare_cells(&a, &b)? == Ordering::Less => Some(b),
                    (None, b) => b,
                    (a, _) => a,
                };
                let upper = match (upper, other_upper) {
                    (Some(a), Some(b)) if compare_cells(&a, &b)? == Ordering::Greater => Some(b),
                    (None, b) => b,
                    (a, _) => a,
                };
                self.kind = PredicateKind::Range { lower, upper };
                self.simplify()?;
            }
            PredicateKind::Equality(value) => {
                let below = match lower {
                    Some(lower) => compare_cells(&lower, &value)? == Ordering::Greater,
                    None => false,
                };
                let above = match upper {
                    Some(upper) => compare_cells(&upper, &value)? != Ordering::Greater,
                    None => false,
                };
                if below || above {
                    self.set_to_none();
                } else {
                    self.kind = PredicateKind::Equality(value);
                }
            }
        }
        Ok(())
    }

    fn merge_into_equality(&mut self, value: Cell<'a>, other: &PredicateKind<'a>) -> Result<()> {
        match *other {
            PredicateKind::None => self.set_to_none(),
            PredicateKind::IsNotNull => {}
            PredicateKind::Range { lower, upper } => {
                let outside = match lower {
                    Some(lower) => compare_cells(&value, &lower)? == Ordering::Less,
                    None => false,
                } || match upper {
                    Some(upper) => compare_cells(&value, &upper)? != Ordering::Less,
                    None => false,
                };
                if outside {
                    self.set_to_none();
                }
            }
            PredicateKind::Equality(other_value) => {
                if compare_cells(&value, &other_value)? != Ordering::Equal {
                    self.set_to_none();
                }
            }
        }
        Ok(())
    }

    /// Whether a column value satisfies the predicate. `None` is NULL.
    pub fn evaluate(&self, cell: Option<&Cell<'_>>) -> bool {
        let Some(cell) = cell else {
            return false;
        };
        let cmp = |bound: &Cell<'_>| compare_cells(cell, bound).ok();
        match &self.kind {
            PredicateKind::None => false,
            PredicateKind::IsNotNull => true,
            PredicateKind::Equality(value) => cmp(value) == Some(Ordering::Equal),
            PredicateKind::Range { lower, upper } => {
                let above_lower = lower
                    .as_ref()
                    .map_or(true, |l| matches!(cmp(l), Some(Ordering::Greater | Ordering::Equal)));
                let below_upper = upper
                    .as_ref()
                    .map_or(true, |u| cmp(u) == Some(Ordering::Less));
                above_lower && below_upper
            }
        }
    }

    /// Orders predicates from most to least selective: by kind first, then
    /// by the width of the column's slot.
    pub fn selectivity_cmp(&self, other: &ColumnPredicate<'_>) -> Ordering {
        self.selectivity_rank().cmp(&other.selectivity_rank())
    }

    fn selectivity_rank(&self) -> usize {
        self.kind.rank() * (MAX_FIXED_SLOT_SIZE + 1) + self.column.data_type().slot_size()
    }
}

fn write_bound(f: &mut fmt::Formatter<'_>, bound: &Cell<'_>) -> fmt::Result {
    match bound.as_bytes() {
        Some(bytes) => {
            f.write_str("\"")?;
            write_escaped(f, bytes)?;
            f.write_str("\"")
        }
        None => write!(f, "{}", bound),
    }
}

impl fmt::Display for ColumnPredicate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.column.name();
        match &self.kind {
            PredicateKind::None => write!(f, "`{}` NONE", name),
            PredicateKind::IsNotNull => write!(f, "`{}` IS NOT NULL", name),
            PredicateKind::Equality(value) => {
                write!(f, "`{}` = ", name)?;
                write_bound(f, value)
            }
            PredicateKind::Range { lower, upper } => {
                if let Some(lower) = lower {
                    write!(f, "`{}` >= ", name)?;
                    write_bound(f, lower)?;
                }
                if let Some(upper) = upper {
                    if lower.is_some() {
                        f.write_str(" AND ")?;
                    }
                    write!(f, "`{}` < ", name)?;
                    write_bound(f, upper)?;
                }
                Ok(())
            }
        }
    }
}
