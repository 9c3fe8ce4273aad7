// crates/trustnet-cli/src/commands/categories.rs
//
// `trustnet categories {list, add}`: category management.

use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use trustnet_core::category::{Category, CategoryKind};
use trustnet_core::traits::VoteStore;

use super::Context;
use crate::output;

/// Category management subcommands.
#[derive(Debug, Subcommand)]
pub enum CategoriesCmd {
    /// List every known category.
    List,
    /// Create or replace a category.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Parent category (secondary only).
        #[arg(long)]
        parent: Option<String>,
        /// Component category (composite only); repeat for several.
        #[arg(long = "component")]
        components: Vec<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    General,
    Normal,
    Secondary,
    Composite,
}

#[derive(Debug, Serialize, Tabled)]
struct CategoryRow {
    name: String,
    #[tabled(rename = "type")]
    kind: &'static str,
    related: String,
    description: String,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        let related = match &category.kind {
            CategoryKind::Secondary { parent } => format!("parent: {}", parent),
            CategoryKind::Composite { components } => {
                format!("components: {}", components.join(", "))
            }
            CategoryKind::General | CategoryKind::Normal => String::new(),
        };
        Self {
            name: category.name.clone(),
            kind: category.kind.label(),
            related,
            description: category.description.clone().unwrap_or_default(),
        }
    }
}

/// Run the categories subcommand.
pub fn run(ctx: &Context, cmd: &CategoriesCmd) -> Result<(), Box<dyn std::error::Error>> {
    let store = ctx.open_store()?;
    match cmd {
        CategoriesCmd::List => {
            let categories = store.list_categories()?;
            if categories.is_empty() {
                println!("No categories. Run `trustnet init` to add the defaults.");
                return Ok(());
            }
            let rows: Vec<CategoryRow> = categories.iter().map(CategoryRow::from).collect();
            output::print(ctx.format, &rows, &categories);
        }
        CategoriesCmd::Add {
            name,
            kind,
            parent,
            components,
            description,
        } => {
            let known: Vec<String> = store
                .list_categories()?
                .into_iter()
                .map(|c| c.name)
                .collect();
            let mut category = build_category(name, *kind, parent.as_deref(), components, &known)?;
            category.description = description.clone();
            store.put_category(&category)?;
            tracing::info!(name = %category.name, kind = category.kind.label(), "category saved");

            let row = CategoryRow::from(&category);
            output::print(ctx.format, std::slice::from_ref(&row), &category);
        }
    }
    Ok(())
}

/// Validate the flags for `categories add` and build the category.
///
/// Parents and components must already exist.
fn build_category(
    name: &str,
    kind: KindArg,
    parent: Option<&str>,
    components: &[String],
    known: &[String],
) -> Result<Category, String> {
    let exists = |n: &str| known.iter().any(|k| k == n);

    if kind != KindArg::Secondary && parent.is_some() {
        return Err("--parent only applies to secondary categories".to_string());
    }
    if kind != KindArg::Composite && !components.is_empty() {
        return Err("--component only applies to composite categories".to_string());
    }

    match kind {
        KindArg::General => Ok(Category::general(name)),
        KindArg::Normal => Ok(Category::normal(name)),
        KindArg::Secondary => {
            let parent = parent.ok_or("secondary categories need --parent")?;
            if parent == name {
                return Err("a category cannot be its own parent".to_string());
            }
            if !exists(parent) {
                return Err(format!("parent category not found: {}", parent));
            }
            Ok(Category::secondary(name, parent))
        }
        KindArg::Composite => {
            if components.is_empty() {
                return Err("composite categories need at least one --component".to_string());
            }
            if let Some(missing) = components.iter().find(|c| !exists(c)) {
                return Err(format!("component category not found: {}", missing));
            }
            Ok(Category::composite(name, components.iter().cloned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        ["general", "research", "outreach"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn secondary_needs_existing_parent() {
        assert!(build_category("eco", KindArg::Secondary, None, &[], &known()).is_err());
        assert!(build_category("eco", KindArg::Secondary, Some("nope"), &[], &known()).is_err());
        assert!(build_category("eco", KindArg::Secondary, Some("eco"), &[], &known()).is_err());

        let category =
            build_category("eco", KindArg::Secondary, Some("research"), &[], &known()).unwrap();
        assert_eq!(
            category.kind,
            CategoryKind::Secondary {
                parent: "research".to_string()
            }
        );
    }

    #[test]
    fn composite_needs_existing_components() {
        assert!(build_category("all", KindArg::Composite, None, &[], &known()).is_err());
        let missing = vec!["research".to_string(), "nope".to_string()];
        assert!(build_category("all", KindArg::Composite, None, &missing, &known()).is_err());

        let components = vec!["research".to_string(), "outreach".to_string()];
        let category =
            build_category("all", KindArg::Composite, None, &components, &known()).unwrap();
        assert_eq!(category.kind, CategoryKind::Composite { components });
    }

    #[test]
    fn stray_flags_rejected() {
        assert!(build_category("x", KindArg::Normal, Some("research"), &[], &known()).is_err());
        let components = vec!["research".to_string()];
        assert!(build_category("x", KindArg::Normal, None, &components, &known()).is_err());
    }

    #[test]
    fn row_shows_links() {
        let row = CategoryRow::from(&Category::secondary("eco", "research"));
        assert_eq!(row.kind, "secondary");
        assert_eq!(row.related, "parent: research");
    }
}
