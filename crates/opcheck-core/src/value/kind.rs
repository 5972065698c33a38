use std::fmt;

///
/// ValueKind
///
/// Stable value-variant classification used by ordering and diagnostics.
///
/// IMPORTANT:
/// `rank` drives the canonical sort order of mixed lists and must stay
/// fixed. `Int` and `Float` share one rank so numbers sort together.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Text,
    List,
    Map,
}

impl ValueKind {
    /// Canonical ordering rank for this kind.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool => 1,
            Self::Int | Self::Float => 2,
            Self::Text => 3,
            Self::List => 4,
            Self::Map => 5,
        }
    }

    /// Stable human-readable label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::List => "list",
            Self::Map => "map",
        }
    }

    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Map)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
