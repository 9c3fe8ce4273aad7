// crates/trustnet-reputation/src/category.rs
//
// Category resolution: turns a category name into its type and the filter
// that scopes every vote query of the computation.

use trustnet_core::category::{CategoryFilter, CategoryKind, CategoryType};
use trustnet_core::error::TrustError;
use trustnet_core::traits::VoteReader;

static MATCH_ALL: CategoryFilter = CategoryFilter::All;

/// A category resolved for scoring, with its effective vote filter attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCategory {
    /// Votes in every category propagate trust.
    General,
    /// Only votes in the category itself propagate trust.
    Normal { filter: CategoryFilter },
    /// Trust propagates through the parent category; `name` is the secondary
    /// category whose direct votes are added on top.
    Secondary { name: String, filter: CategoryFilter },
    /// Trust propagates through the components and the category itself.
    Composite { filter: CategoryFilter },
}

impl ResolvedCategory {
    /// The filter applied to network discovery and matrix construction.
    pub fn filter(&self) -> &CategoryFilter {
        match self {
            ResolvedCategory::General => &MATCH_ALL,
            ResolvedCategory::Normal { filter }
            | ResolvedCategory::Secondary { filter, .. }
            | ResolvedCategory::Composite { filter } => filter,
        }
    }

    pub fn category_type(&self) -> CategoryType {
        match self {
            ResolvedCategory::General => CategoryType::General,
            ResolvedCategory::Normal { .. } => CategoryType::Normal,
            ResolvedCategory::Secondary { .. } => CategoryType::Secondary,
            ResolvedCategory::Composite { .. } => CategoryType::Composite,
        }
    }

    /// Short lowercase type label.
    pub fn label(&self) -> &'static str {
        self.category_type().label()
    }
}

/// Look up `name` and expand it into a [`ResolvedCategory`].
///
/// Returns `TrustError::CategoryNotFound` for unknown names; the engine maps
/// that to a score of 0.0.
pub fn resolve_category<R: VoteReader + ?Sized>(
    reader: &R,
    name: &str,
) -> Result<ResolvedCategory, TrustError> {
    let category = reader
        .category_lookup(name)?
        .ok_or_else(|| TrustError::CategoryNotFound(name.to_string()))?;

    let resolved = match category.kind {
        CategoryKind::General => ResolvedCategory::General,
        CategoryKind::Normal => ResolvedCategory::Normal {
            filter: CategoryFilter::only([category.name]),
        },
        CategoryKind::Secondary { parent } => ResolvedCategory::Secondary {
            name: category.name,
            filter: CategoryFilter::only([parent]),
        },
        CategoryKind::Composite { mut components } => {
            components.push(category.name);
            ResolvedCategory::Composite {
                filter: CategoryFilter::only(components),
            }
        }
    };
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustnet_core::category::Category;
    use trustnet_core::traits::VoteStore;
    use trustnet_store::InMemoryVoteStore;

    fn store() -> InMemoryVoteStore {
        InMemoryVoteStore::with_categories([
            Category::general("general"),
            Category::normal("research"),
            Category::secondary("ecosystem", "research"),
            Category::composite("safety", ["research", "ecosystem"]),
        ])
    }

    #[test]
    fn general_has_no_filter() {
        let store = store();
        let snapshot = store.snapshot().unwrap();
        let resolved = resolve_category(&snapshot, "general").unwrap();
        assert_eq!(resolved, ResolvedCategory::General);
        assert_eq!(resolved.filter(), &CategoryFilter::All);
    }

    #[test]
    fn normal_filters_on_itself() {
        let store = store();
        let snapshot = store.snapshot().unwrap();
        let resolved = resolve_category(&snapshot, "research").unwrap();
        assert_eq!(resolved.label(), "normal");
        assert_eq!(resolved.filter(), &CategoryFilter::only(["research"]));
    }

    #[test]
    fn secondary_filters_on_parent() {
        let store = store();
        let snapshot = store.snapshot().unwrap();
        let resolved = resolve_category(&snapshot, "ecosystem").unwrap();
        assert_eq!(
            resolved,
            ResolvedCategory::Secondary {
                name: "ecosystem".to_string(),
                filter: CategoryFilter::only(["research"]),
            }
        );
    }

    #[test]
    fn composite_filters_on_components_and_itself() {
        let store = store();
        let snapshot = store.snapshot().unwrap();
        let resolved = resolve_category(&snapshot, "safety").unwrap();
        assert_eq!(
            resolved.filter(),
            &CategoryFilter::only(["research", "ecosystem", "safety"])
        );
    }

    #[test]
    fn resolved_type_matches_stored_kind() {
        let store = store();
        let snapshot = store.snapshot().unwrap();
        for name in ["general", "research", "ecosystem", "safety"] {
            let stored = snapshot.category_lookup(name).unwrap().unwrap();
            let resolved = resolve_category(&snapshot, name).unwrap();
            assert_eq!(resolved.category_type(), stored.kind.category_type());
            assert_eq!(resolved.label(), stored.kind.label());
        }
    }

    #[test]
    fn unknown_category_is_not_found() {
        let store = store();
        let snapshot = store.snapshot().unwrap();
        let err = resolve_category(&snapshot, "does-not-exist").unwrap_err();
        assert!(matches!(err, TrustError::CategoryNotFound(name) if name == "does-not-exist"));
    }
}
