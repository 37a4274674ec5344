//! Category Tree Utilities
//!
//! Helper functions for the category sidebar and product listings.

use std::collections::{HashMap, HashSet};

use crate::domain::{Category, CategoryId, ProductEntry, ROOT_CATEGORY};

/// Products shown per category page
pub const PRODUCTS_PER_PAGE: usize = 60;

/// One entry of the sidebar trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// `None` while the category for this slug is not loaded
    pub name: Option<String>,
    pub url: String,
}

/// Direct children of `parent`, sorted by name then id
pub fn children_of(categories: &[Category], parent: CategoryId) -> Vec<&Category> {
    let mut children: Vec<&Category> = categories.iter().filter(|c| c.parent == parent).collect();
    children.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    children
}

/// Resolve a route trail such as `["brandschutz", "loescher"]`.
///
/// Each slug resolves on its own. When several categories share a slug, the
/// child of the previous resolved crumb wins. The url of a crumb is the trail
/// up to and including it.
pub fn breadcrumbs(categories: &[Category], trail: &[&str]) -> Vec<Breadcrumb> {
    let mut parent: Option<CategoryId> = None;
    let mut url = String::new();

    trail
        .iter()
        .map(|slug| {
            url.push('/');
            url.push_str(slug);

            let expected_parent = parent.unwrap_or(ROOT_CATEGORY);
            let found = categories
                .iter()
                .find(|c| c.slug == *slug && c.parent == expected_parent)
                .or_else(|| categories.iter().find(|c| c.slug == *slug));
            if let Some(category) = found {
                parent = Some(category.id);
            }

            Breadcrumb {
                name: found.map(|c| c.name.clone()),
                url: url.clone(),
            }
        })
        .collect()
}

/// Render categories as indented tree using recursive DFS
/// Returns (Category, depth) pairs in display order
pub fn flatten_categories(
    categories: &[Category],
    expanded: &HashSet<CategoryId>,
) -> Vec<(Category, usize)> {
    let mut children_map: HashMap<CategoryId, Vec<&Category>> = HashMap::new();
    for category in categories {
        children_map.entry(category.parent).or_default().push(category);
    }

    for children in children_map.values_mut() {
        children.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    }

    fn collect(
        parent: CategoryId,
        depth: usize,
        children_map: &HashMap<CategoryId, Vec<&Category>>,
        expanded: &HashSet<CategoryId>,
        visited: &mut HashSet<CategoryId>,
        result: &mut Vec<(Category, usize)>,
    ) {
        if let Some(children) = children_map.get(&parent) {
            for category in children {
                // a category listing itself as an ancestor would recurse forever
                if !visited.insert(category.id) {
                    continue;
                }
                result.push(((*category).clone(), depth));
                if expanded.contains(&category.id) {
                    collect(category.id, depth + 1, children_map, expanded, visited, result);
                }
            }
        }
    }

    let mut result = Vec::new();
    let mut visited = HashSet::new();
    collect(ROOT_CATEGORY, 0, &children_map, expanded, &mut visited, &mut result);
    result
}

/// Products of `category`, sorted by `order`, for the 1-based `page`
pub fn product_page(
    products: &[ProductEntry],
    category: CategoryId,
    page: usize,
    per_page: usize,
) -> Vec<&ProductEntry> {
    if page == 0 {
        return Vec::new();
    }

    let mut in_category: Vec<&ProductEntry> = products
        .iter()
        .filter(|p| p.category_ids.contains(&category))
        .collect();
    in_category.sort_by_key(|p| p.order);

    in_category
        .into_iter()
        .skip(per_page.saturating_mul(page - 1))
        .take(per_page)
        .collect()
}
