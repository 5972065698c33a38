use crate::{
    error::VerifyError,
    operator::{CanonicalOp, FamilySet},
};
use std::{collections::BTreeMap, sync::LazyLock};

///
/// OperatorRule
///
/// One accepted token: the canonical operator it denotes and the families
/// that operator belongs to.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OperatorRule {
    pub token: &'static str,
    pub op: CanonicalOp,
    pub families: FamilySet,
}

const EQUALITY: FamilySet = FamilySet::NUMERICAL.union(FamilySet::SEQUENCE);
const ORDERING: FamilySet = FamilySet::NUMERICAL;
const MEMBERSHIP: FamilySet = FamilySet::SEQUENCE.union(FamilySet::STRING);
const TEXTUAL: FamilySet = FamilySet::STRING;
const VALIDATION: FamilySet = FamilySet::SEQUENCE.union(FamilySet::EVAL);
const TRANSFORM: FamilySet = FamilySet::EVAL;

const fn rule(token: &'static str, op: CanonicalOp, families: FamilySet) -> OperatorRule {
    OperatorRule {
        token,
        op,
        families,
    }
}

/// Every accepted token.
/// Tokens are stored in normalized form (lowercase, no spaces/underscores).
pub const OPERATOR_TABLE: &[OperatorRule] = &[
    // equality
    rule("==", CanonicalOp::Eq, EQUALITY),
    rule("equal", CanonicalOp::Eq, EQUALITY),
    rule("shouldbe", CanonicalOp::Eq, EQUALITY),
    rule("!=", CanonicalOp::Ne, EQUALITY),
    rule("inequal", CanonicalOp::Ne, EQUALITY),
    rule("shouldnotbe", CanonicalOp::Ne, EQUALITY),
    // ordering
    rule("<", CanonicalOp::Lt, ORDERING),
    rule("lessthan", CanonicalOp::Lt, ORDERING),
    rule(">", CanonicalOp::Gt, ORDERING),
    rule("greaterthan", CanonicalOp::Gt, ORDERING),
    rule("<=", CanonicalOp::Le, ORDERING),
    rule(">=", CanonicalOp::Ge, ORDERING),
    // membership
    rule("*=", CanonicalOp::Contains, MEMBERSHIP),
    rule("contains", CanonicalOp::Contains, MEMBERSHIP),
    // text
    rule("^=", CanonicalOp::StartsWith, TEXTUAL),
    rule("starts", CanonicalOp::StartsWith, TEXTUAL),
    rule("shouldstartwith", CanonicalOp::StartsWith, TEXTUAL),
    rule("$=", CanonicalOp::EndsWith, TEXTUAL),
    rule("ends", CanonicalOp::EndsWith, TEXTUAL),
    rule("matches", CanonicalOp::Matches, TEXTUAL),
    // evaluation
    rule("validate", CanonicalOp::Validate, VALIDATION),
    rule("then", CanonicalOp::Then, TRANSFORM),
    rule("evaluate", CanonicalOp::Then, TRANSFORM),
];

///
/// Taxonomy
///
/// Lookup structures derived once from `OPERATOR_TABLE`.
/// Immutable after construction; safe for unsynchronized concurrent reads.
///

#[derive(Debug)]
pub struct Taxonomy {
    tokens: BTreeMap<&'static str, CanonicalOp>,
    families: BTreeMap<CanonicalOp, FamilySet>,
}

impl Taxonomy {
    fn build(rules: &'static [OperatorRule]) -> Self {
        let mut tokens = BTreeMap::new();
        let mut families = BTreeMap::new();

        for rule in rules {
            tokens.insert(rule.token, rule.op);
            families
                .entry(rule.op)
                .and_modify(|set: &mut FamilySet| *set = set.union(rule.families))
                .or_insert(rule.families);
        }

        Self { tokens, families }
    }

    /// Resolve a raw token to its canonical operator.
    pub fn resolve(&self, token: &str) -> Result<CanonicalOp, VerifyError> {
        let normalized = normalize_token(token);

        self.tokens
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| VerifyError::UnknownOperator {
                token: token.to_string(),
            })
    }

    #[must_use]
    pub fn families(&self, op: CanonicalOp) -> FamilySet {
        self.families.get(&op).copied().unwrap_or(FamilySet::EMPTY)
    }

    /// All accepted (normalized) tokens for `op`.
    pub fn tokens_for(&self, op: CanonicalOp) -> impl Iterator<Item = &'static str> + '_ {
        self.tokens
            .iter()
            .filter(move |(_, candidate)| **candidate == op)
            .map(|(token, _)| *token)
    }
}

static TAXONOMY: LazyLock<Taxonomy> = LazyLock::new(|| Taxonomy::build(OPERATOR_TABLE));

/// Process-wide taxonomy, built on first use.
#[must_use]
pub fn taxonomy() -> &'static Taxonomy {
    &TAXONOMY
}

/// Resolve a raw token against the process-wide taxonomy.
pub fn resolve(token: &str) -> Result<CanonicalOp, VerifyError> {
    taxonomy().resolve(token)
}

/// Resolve an optional token; `None` stays `None`.
pub fn resolve_optional(token: Option<&str>) -> Result<Option<CanonicalOp>, VerifyError> {
    token.map(resolve).transpose()
}

// Tokens compare case-insensitively and ignore spaces and underscores,
// so "Should Be", "should_be" and "shouldbe" are one token.
fn normalize_token(token: &str) -> String {
    token
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
