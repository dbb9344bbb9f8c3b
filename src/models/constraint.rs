//! Subject-category incompatibilities.
//!
//! Certain subjects may not be examined on the same calendar day. The rule
//! set is declarative: named keyword groups plus exclusion rules between
//! (or within) groups. A subject belongs to a group when its upper-cased
//! name contains any of the group's keywords, so combined names such as
//! `MATEMÀTIQUES / MATES CS` still match.
//!
//! # Standard rules
//!
//! | Rule | Kind |
//! |------|------|
//! | Math × Spanish | between |
//! | Math × Physics | between |
//! | Catalan × Spanish | between |
//! | Catalan × Math | between |
//! | Catalan × Catalan literature | between |
//! | Economics × Business | between |
//! | Science/Technology | within (mutually exclusive) |
//! | Technical drawing × Science/Technology | between |

use serde::{Deserialize, Serialize};

/// Keywords identifying the mathematics family.
pub const MATH_KEYWORDS: [&str; 3] = ["MATES", "MATES CS", "MATEMÀTIQUES"];

/// Group names used by [`ConflictRules::standard`].
pub mod groups {
    pub const MATH: &str = "math";
    pub const SPANISH: &str = "spanish";
    pub const CATALAN: &str = "catalan";
    pub const CATALAN_LITERATURE: &str = "catalan-literature";
    pub const PHYSICS: &str = "physics";
    pub const ECONOMICS: &str = "economics";
    pub const BUSINESS: &str = "business";
    pub const DRAWING: &str = "technical-drawing";
    pub const SCIENCE_TECHNOLOGY: &str = "science-technology";
}

/// Whether a subject name belongs to the mathematics family.
pub fn is_math_subject(name: &str) -> bool {
    let upper = name.to_uppercase();
    MATH_KEYWORDS.iter().any(|k| upper.contains(k))
}

/// A named set of subject-name keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Group identifier referenced by rules.
    pub name: String,
    /// Upper-case keywords; substring match on the upper-cased subject name.
    pub keywords: Vec<String>,
}

impl CategoryGroup {
    /// Creates a group from keywords (upper-cased on construction).
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// Whether an already upper-cased subject name belongs to this group.
    #[inline]
    fn matches_upper(&self, upper_name: &str) -> bool {
        self.keywords.iter().any(|k| upper_name.contains(k.as_str()))
    }
}

/// A same-day exclusion between category groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionRule {
    /// A subject of group `a` and a subject of group `b` may not share a day.
    /// Symmetric.
    Between { a: String, b: String },
    /// Any two subjects of `group` may not share a day.
    Within { group: String },
}

impl ExclusionRule {
    /// Creates a symmetric between-groups rule.
    pub fn between(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::Between {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Creates a mutually-exclusive group rule.
    pub fn within(group: impl Into<String>) -> Self {
        Self::Within {
            group: group.into(),
        }
    }
}

/// Group memberships of one subject name, as indices into
/// [`ConflictRules::groups`].
///
/// Computing memberships once per subject lets repeated checks skip
/// string matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories(Vec<usize>);

impl Categories {
    #[inline]
    fn contains(&self, group: usize) -> bool {
        self.0.contains(&group)
    }

    /// Whether the name matched no group at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Same-day incompatibility oracle.
///
/// # Example
/// ```
/// use retake_schedule::models::ConflictRules;
///
/// let rules = ConflictRules::standard();
/// assert!(rules.incompatible("MATES", "CASTELLÀ"));
/// assert!(rules.incompatible("QUÍMICA", "BIOLOGIA"));
/// assert!(!rules.incompatible("ANGLÈS", "HISTÒRIA"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRules {
    groups: Vec<CategoryGroup>,
    rules: Vec<ExclusionRule>,
}

impl ConflictRules {
    /// Creates an empty rule set (everything compatible).
    pub fn new() -> Self {
        Self::default()
    }

    /// The institution's fixed rule set.
    pub fn standard() -> Self {
        use groups::*;

        Self::new()
            .with_group(CategoryGroup::new(MATH, MATH_KEYWORDS))
            .with_group(CategoryGroup::new(SPANISH, ["CASTELLÀ", "LLENGUA CASTELLANA"]))
            .with_group(CategoryGroup::new(CATALAN, ["CATALÀ", "LLENGUA CATALANA"]))
            .with_group(CategoryGroup::new(
                CATALAN_LITERATURE,
                ["LIT CATALANA", "LITERATURA CATALANA"],
            ))
            .with_group(CategoryGroup::new(PHYSICS, ["FÍSICA"]))
            .with_group(CategoryGroup::new(ECONOMICS, ["ECONOMIA"]))
            .with_group(CategoryGroup::new(BUSINESS, ["F. EMPRESA", "EMPRESA", "NEGOCI"]))
            .with_group(CategoryGroup::new(DRAWING, ["DIBUIX", "DIBUIX TÈCNIC"]))
            .with_group(CategoryGroup::new(
                SCIENCE_TECHNOLOGY,
                [
                    "FÍSICA",
                    "QUÍMICA",
                    "BIOLOGIA",
                    "TECNOLOGIA",
                    "GEOLOGIA",
                    "CIÈNCIES DE LA TERRA",
                    "ELECTROTÈCNIA",
                ],
            ))
            .with_rule(ExclusionRule::between(MATH, SPANISH))
            .with_rule(ExclusionRule::between(MATH, PHYSICS))
            .with_rule(ExclusionRule::between(CATALAN, SPANISH))
            .with_rule(ExclusionRule::between(CATALAN, MATH))
            .with_rule(ExclusionRule::between(CATALAN, CATALAN_LITERATURE))
            .with_rule(ExclusionRule::between(ECONOMICS, BUSINESS))
            .with_rule(ExclusionRule::within(SCIENCE_TECHNOLOGY))
            .with_rule(ExclusionRule::between(DRAWING, SCIENCE_TECHNOLOGY))
    }

    /// Adds a keyword group.
    pub fn with_group(mut self, group: CategoryGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds an exclusion rule. Rules naming unknown groups never fire.
    pub fn with_rule(mut self, rule: ExclusionRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Registered groups.
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Registered rules.
    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    /// Computes the group memberships of a subject name.
    pub fn classify(&self, subject_name: &str) -> Categories {
        let upper = subject_name.to_uppercase();
        Categories(
            self.groups
                .iter()
                .enumerate()
                .filter(|(_, g)| g.matches_upper(&upper))
                .map(|(i, _)| i)
                .collect(),
        )
    }

    /// Whether two classified subjects may not share a calendar day.
    pub fn conflicts(&self, a: &Categories, b: &Categories) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }

        self.rules.iter().any(|rule| match rule {
            ExclusionRule::Between { a: ga, b: gb } => {
                match (self.group_index(ga), self.group_index(gb)) {
                    (Some(x), Some(y)) => {
                        (a.contains(x) && b.contains(y)) || (a.contains(y) && b.contains(x))
                    }
                    _ => false,
                }
            }
            ExclusionRule::Within { group } => self
                .group_index(group)
                .is_some_and(|g| a.contains(g) && b.contains(g)),
        })
    }

    /// Whether two subjects may not be examined on the same calendar day.
    ///
    /// Symmetric and case-insensitive.
    pub fn incompatible(&self, subject_a: &str, subject_b: &str) -> bool {
        self.conflicts(&self.classify(subject_a), &self.classify(subject_b))
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }
}
