//! Operator taxonomy: canonical operators, their families, and the alias
//! table every accepted token resolves through.

mod table;


use crate::error::VerifyError;
use std::{fmt, str::FromStr};

// re-exports
pub use table::{OPERATOR_TABLE, OperatorRule, Taxonomy, resolve, resolve_optional, taxonomy};

///
/// CanonicalOp
///
/// The single internal operator a group of alias tokens resolves to.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CanonicalOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Contains,
    StartsWith,
    EndsWith,
    Matches,
    Validate,
    Then,
}

impl CanonicalOp {
    pub const ALL: [Self; 12] = [
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Ge,
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
        Self::Matches,
        Self::Validate,
        Self::Then,
    ];

    /// Canonical symbol; always an accepted token itself.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Contains => "*=",
            Self::StartsWith => "^=",
            Self::EndsWith => "$=",
            Self::Matches => "matches",
            Self::Validate => "validate",
            Self::Then => "then",
        }
    }

    /// Dense index into per-operator tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True for operators that hand the expected operand to the evaluator.
    #[must_use]
    pub const fn evaluates(self) -> bool {
        matches!(self, Self::Validate | Self::Then)
    }

    /// Families this operator belongs to.
    #[must_use]
    pub fn families(self) -> FamilySet {
        taxonomy().families(self)
    }

    #[must_use]
    pub fn is_in(self, family: OperatorFamily) -> bool {
        self.families().contains(family)
    }
}

impl fmt::Display for CanonicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CanonicalOp {
    type Err = VerifyError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        resolve(token)
    }
}

///
/// OperatorFamily
///
/// Grouping used to restrict which operators apply to a value's type.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperatorFamily {
    Numerical,
    Sequence,
    String,
    Eval,
}

impl OperatorFamily {
    pub const ALL: [Self; 4] = [Self::Numerical, Self::Sequence, Self::String, Self::Eval];

    const fn bit(self) -> u8 {
        match self {
            Self::Numerical => 1,
            Self::Sequence => 1 << 1,
            Self::String => 1 << 2,
            Self::Eval => 1 << 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Numerical => "Numerical",
            Self::Sequence => "Sequence",
            Self::String => "String",
            Self::Eval => "Eval",
        }
    }
}

impl fmt::Display for OperatorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// FamilySet
///
/// Small const bitset of operator families.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct FamilySet(u8);

impl FamilySet {
    pub const EMPTY: Self = Self(0);
    pub const NUMERICAL: Self = Self::of(OperatorFamily::Numerical);
    pub const SEQUENCE: Self = Self::of(OperatorFamily::Sequence);
    pub const STRING: Self = Self::of(OperatorFamily::String);
    pub const EVAL: Self = Self::of(OperatorFamily::Eval);

    #[must_use]
    pub const fn of(family: OperatorFamily) -> Self {
        Self(family.bit())
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn contains(self, family: OperatorFamily) -> bool {
        self.0 & family.bit() != 0
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = OperatorFamily> {
        OperatorFamily::ALL
            .into_iter()
            .filter(move |family| self.contains(*family))
    }
}

impl fmt::Display for FamilySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, family) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{family}")?;
        }
        Ok(())
    }
}
