//! Category display formatting
//!
//! Formats categories as a tree grouped by macro group, or as a flat table.

use crate::models::{BudgetCategory, MacroGroup};

/// Format categories as a tree under their macro group
///
/// Untagged categories are listed last under "Any group".
pub fn format_category_tree(categories: &[BudgetCategory]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'famfin init' to create default categories."
            .to_string();
    }

    let mut sections: Vec<(String, Vec<&BudgetCategory>)> = MacroGroup::all()
        .iter()
        .map(|group| {
            let members = categories
                .iter()
                .filter(|c| c.macro_group == Some(*group))
                .collect();
            (group.label().to_string(), members)
        })
        .collect();
    sections.push((
        "Any group".to_string(),
        categories.iter().filter(|c| c.macro_group.is_none()).collect(),
    ));

    let blocks: Vec<String> = sections
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(title, members)| {
            let mut block = format!("{}\n", title);
            for (j, category) in members.iter().enumerate() {
                let prefix = if j == members.len() - 1 {
                    "└── "
                } else {
                    "├── "
                };
                let weight = category
                    .default_percentage
                    .map(|w| format!(" (weight: {}%)", w))
                    .unwrap_or_default();
                block.push_str(&format!("  {}{}{}\n", prefix, category.name, weight));
            }
            block
        })
        .collect();

    blocks.join("\n")
}

/// Format a flat table of categories
pub fn format_category_list(categories: &[BudgetCategory]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:<11}  {:>7}  {}\n",
        "Category",
        "Group",
        "Weight",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:-<11}  {:->7}  {:-<12}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        let group = category
            .macro_group
            .map_or("any", |g| g.label());
        let weight = category
            .default_percentage
            .map_or_else(|| "-".to_string(), |w| format!("{:.1}%", w));

        output.push_str(&format!(
            "{:<width$}  {:<11}  {:>7}  {}\n",
            category.name,
            group,
            weight,
            category.id,
            width = name_width
        ));
    }

    output
}
