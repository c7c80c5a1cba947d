//! Gamification rules: point values per activity and badge criteria.
//!
//! Badge criteria are small boolean expressions over a user's
//! [`ActivityStats`]:
//!
//! ```text
//! snippet_created >= 10 && points > 50
//! ai_generation >= 5 and search >= 1
//! ```
//!
//! A clause is `<metric> <op> <integer>`. The metric is an activity name
//! (see [`Activity::as_str`]) or `points` / `total_points`. Clauses are joined
//! with `&&` or `and`; all of them must hold.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entities::{ActivityStats, Badge};
use crate::enums::Activity;
use crate::errors::CoreError;

static CLAUSE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&&|\s+and\s+").expect("clause separator is a valid regex")
});

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

/// Points awarded per activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsTable {
    pub snippet_created: i64,
    pub collection_created: i64,
    pub ai_generation: i64,
    pub ai_explanation: i64,
    pub ai_tagging: i64,
    pub snippet_indexed: i64,
    pub search: i64,
}

impl Default for PointsTable {
    fn default() -> Self {
        Self {
            snippet_created: 10,
            collection_created: 5,
            ai_generation: 3,
            ai_explanation: 2,
            ai_tagging: 2,
            snippet_indexed: 1,
            search: 1,
        }
    }
}

impl PointsTable {
    #[must_use]
    pub const fn points_for(&self, activity: Activity) -> i64 {
        match activity {
            Activity::SnippetCreated => self.snippet_created,
            Activity::CollectionCreated => self.collection_created,
            Activity::AiGeneration => self.ai_generation,
            Activity::AiExplanation => self.ai_explanation,
            Activity::AiTagging => self.ai_tagging,
            Activity::SnippetIndexed => self.snippet_indexed,
            Activity::Search => self.search,
        }
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// What a clause measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Count(Activity),
    Points,
}

impl Metric {
    fn value(self, stats: &ActivityStats) -> i64 {
        match self {
            Self::Count(activity) => i64::try_from(stats.count(activity)).unwrap_or(i64::MAX),
            Self::Points => stats.total_points,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(activity) => f.write_str(activity.as_str()),
            Self::Points => f.write_str("points"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Ge,
    Gt,
    Eq,
    Le,
    Lt,
}

impl Comparison {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Ge => ">=",
            Self::Gt => ">",
            Self::Eq => "==",
            Self::Le => "<=",
            Self::Lt => "<",
        }
    }

    const fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Ge => lhs >= rhs,
            Self::Gt => lhs > rhs,
            Self::Eq => lhs == rhs,
            Self::Le => lhs <= rhs,
            Self::Lt => lhs < rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    pub metric: Metric,
    pub op: Comparison,
    pub threshold: i64,
}

impl Clause {
    fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        let invalid = |reason: &str| {
            CoreError::Validation(format!("invalid badge criteria clause '{raw}': {reason}"))
        };

        let op_start = raw
            .find(['<', '>', '='])
            .ok_or_else(|| invalid("missing comparison operator"))?;
        let (metric, rest) = raw.split_at(op_start);

        let (op, rest) = [
            (">=", Comparison::Ge),
            ("<=", Comparison::Le),
            ("==", Comparison::Eq),
            (">", Comparison::Gt),
            ("<", Comparison::Lt),
        ]
        .into_iter()
        .find_map(|(symbol, op)| rest.strip_prefix(symbol).map(|r| (op, r)))
        .ok_or_else(|| invalid("unknown operator"))?;

        let metric = match metric.trim() {
            "points" | "total_points" => Metric::Points,
            "" => return Err(invalid("missing metric")),
            name => Metric::Count(
                Activity::from_name(name).ok_or_else(|| invalid("unknown metric"))?,
            ),
        };

        let threshold = rest
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid("threshold must be an integer"))?;

        Ok(Self {
            metric,
            op,
            threshold,
        })
    }

    #[must_use]
    pub fn is_met(&self, stats: &ActivityStats) -> bool {
        self.op.holds(self.metric.value(stats), self.threshold)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.metric, self.op.symbol(), self.threshold)
    }
}

/// Parsed badge criteria. All clauses must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeCriteria {
    clauses: Vec<Clause>,
}

impl BadgeCriteria {
    /// Parse a criteria expression.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for empty input, unknown metrics or
    /// operators, and non-integer thresholds.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.trim().is_empty() {
            return Err(CoreError::Validation(
                "badge criteria must not be empty".to_string(),
            ));
        }
        let clauses = CLAUSE_SEPARATOR
            .split(raw)
            .map(Clause::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { clauses })
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[must_use]
    pub fn is_met(&self, stats: &ActivityStats) -> bool {
        self.clauses.iter().all(|c| c.is_met(stats))
    }
}

impl FromStr for BadgeCriteria {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BadgeCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

/// Validate a badge definition before it is stored.
///
/// # Errors
///
/// Returns `CoreError::Validation` for an empty slug or name, or bad criteria.
pub fn validate_badge(badge: &Badge) -> Result<BadgeCriteria, CoreError> {
    if badge.slug.trim().is_empty() {
        return Err(CoreError::Validation("badge slug is required".to_string()));
    }
    if badge.name.trim().is_empty() {
        return Err(CoreError::Validation("badge name is required".to_string()));
    }
    BadgeCriteria::parse(&badge.criteria)
}

/// The badges seeded when no others are configured.
#[must_use]
pub fn default_badges() -> Vec<Badge> {
    [
        ("first-snippet", "First Snippet", "Saved your first snippet", "snippet_created >= 1"),
        ("collector", "Collector", "Saved ten snippets", "snippet_created >= 10"),
        ("organizer", "Organizer", "Created three collections", "collection_created >= 3"),
        ("ai-apprentice", "AI Apprentice", "Generated code with AI five times", "ai_generation >= 5"),
        ("explorer", "Explorer", "Ran ten searches", "search >= 10"),
        ("centurion", "Centurion", "Earned 100 points", "points >= 100"),
    ]
    .into_iter()
    .map(|(slug, name, description, criteria)| Badge {
        slug: slug.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        criteria: criteria.to_string(),
        icon: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn stats(counts: &[(Activity, u64)], total_points: i64) -> ActivityStats {
        ActivityStats {
            counts: counts.iter().copied().collect(),
            total_points,
        }
    }

    #[test]
    fn default_points_match_documented_values() {
        let table = PointsTable::default();
        assert_eq!(table.points_for(Activity::SnippetCreated), 10);
        assert_eq!(table.points_for(Activity::CollectionCreated), 5);
        assert_eq!(table.points_for(Activity::AiGeneration), 3);
        assert_eq!(table.points_for(Activity::Search), 1);
    }

    #[test]
    fn parses_single_clause() {
        let criteria = BadgeCriteria::parse("snippet_created >= 10").unwrap();
        assert_eq!(
            criteria.clauses(),
            &[Clause {
                metric: Metric::Count(Activity::SnippetCreated),
                op: Comparison::Ge,
                threshold: 10,
            }]
        );
    }

    #[rstest]
    #[case("snippet_created>=1&&points>5")]
    #[case("snippet_created >= 1 && points > 5")]
    #[case("snippet_created >= 1 AND total_points > 5")]
    #[case("  snippet_created>=1   and   points>5  ")]
    fn whitespace_and_separators_are_insignificant(#[case] raw: &str) {
        let criteria = BadgeCriteria::parse(raw).unwrap();
        assert_eq!(criteria.to_string(), "snippet_created >= 1 && points > 5");
    }

    #[rstest]
    #[case("")]
    #[case("snippet_created")]
    #[case("unknown_metric >= 1")]
    #[case(">= 3")]
    #[case("search >= many")]
    #[case("search => 1")]
    #[case("search >= 1 &&")]
    fn rejects_invalid_criteria(#[case] raw: &str) {
        assert!(matches!(
            BadgeCriteria::parse(raw),
            Err(CoreError::Validation(_))
        ));
    }

    #[rstest]
    #[case("search >= 10", 10, true)]
    #[case("search >= 10", 9, false)]
    #[case("search > 10", 10, false)]
    #[case("search == 3", 3, true)]
    #[case("search <= 3", 4, false)]
    #[case("search < 1", 0, true)]
    fn comparisons(#[case] raw: &str, #[case] searches: u64, #[case] expected: bool) {
        let criteria = BadgeCriteria::parse(raw).unwrap();
        assert_eq!(
            criteria.is_met(&stats(&[(Activity::Search, searches)], 0)),
            expected
        );
    }

    #[test]
    fn all_clauses_must_hold() {
        let criteria = BadgeCriteria::parse("snippet_created >= 2 && points >= 50").unwrap();
        assert!(!criteria.is_met(&stats(&[(Activity::SnippetCreated, 2)], 20)));
        assert!(criteria.is_met(&stats(&[(Activity::SnippetCreated, 5)], 50)));
    }

    #[test]
    fn missing_activity_counts_as_zero() {
        let criteria = BadgeCriteria::parse("ai_tagging >= 1").unwrap();
        assert!(!criteria.is_met(&ActivityStats::default()));
    }

    #[test]
    fn default_badges_parse() {
        let badges = default_badges();
        assert_eq!(badges.len(), 6);
        for badge in &badges {
            validate_badge(badge).unwrap();
        }
    }

    #[test]
    fn validate_badge_requires_slug() {
        let mut badge = default_badges().remove(0);
        badge.slug = "  ".to_string();
        assert!(validate_badge(&badge).is_err());
    }
}
