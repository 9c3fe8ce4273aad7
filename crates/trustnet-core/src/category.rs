// crates/trustnet-core/src/category.rs
//
// Trust categories ("flavors") and the filter used to scope vote queries.
//
// Every vote belongs to exactly one category. A category's type decides
// which votes feed the propagated network when a score is computed for it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Name of the built-in category that spans every vote.
pub const GENERAL_CATEGORY: &str = "general";

/// The type of a trust category, with the type-specific links attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CategoryKind {
    /// Spans every vote in every category.
    General,
    /// Scoped to votes cast in this category only.
    Normal,
    /// Propagates trust through `parent`; direct votes in the category itself
    /// are folded in on top.
    Secondary {
        /// The category this one is "secondary of".
        parent: String,
    },
    /// Scoped to the union of `components` and the category itself.
    Composite {
        /// Categories this one is composed of.
        components: Vec<String>,
    },
}

impl CategoryKind {
    pub fn category_type(&self) -> CategoryType {
        match self {
            CategoryKind::General => CategoryType::General,
            CategoryKind::Normal => CategoryType::Normal,
            CategoryKind::Secondary { .. } => CategoryType::Secondary,
            CategoryKind::Composite { .. } => CategoryType::Composite,
        }
    }

    /// Short lowercase label, as used in the `type` tag.
    pub fn label(&self) -> &'static str {
        self.category_type().label()
    }
}

/// The type of a category without its links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryType {
    General,
    Normal,
    Secondary,
    Composite,
}

impl CategoryType {
    /// Short lowercase label, as used in the `type` tag.
    pub fn label(self) -> &'static str {
        match self {
            CategoryType::General => "general",
            CategoryType::Normal => "normal",
            CategoryType::Secondary => "secondary",
            CategoryType::Composite => "composite",
        }
    }
}

/// A named trust category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(flatten)]
    pub kind: CategoryKind,
    /// Free-form description; never read by the scoring engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    pub fn general(name: impl Into<String>) -> Self {
        Self::with_kind(name, CategoryKind::General)
    }

    pub fn normal(name: impl Into<String>) -> Self {
        Self::with_kind(name, CategoryKind::Normal)
    }

    pub fn secondary(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            CategoryKind::Secondary {
                parent: parent.into(),
            },
        )
    }

    pub fn composite<I, S>(name: impl Into<String>, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(
            name,
            CategoryKind::Composite {
                components: components.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Attach a human-readable description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn with_kind(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
        }
    }
}

/// Which categories a vote query should match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category (used by `general`).
    All,
    /// Only the listed category names.
    Only(BTreeSet<String>),
}

impl CategoryFilter {
    /// Build a filter matching exactly the given names.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategoryFilter::Only(names.into_iter().map(Into::into).collect())
    }

    /// Whether a vote in `category` passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(names) => names.contains(category),
        }
    }
}
