//! Cost center display formatting

use crate::models::CostCenter;

/// Format cost centers as a table
pub fn format_cost_center_list(cost_centers: &[CostCenter]) -> String {
    if cost_centers.is_empty() {
        return "No cost centers found.\n\nAdd one with 'famfin cost-center add NAME'.".to_string();
    }

    let name_width = cost_centers
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(11)
        .max(11);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>13}  {:<8}  {}\n",
        "Cost Center",
        "Default Split",
        "Status",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:->13}  {:-<8}  {:-<11}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for cc in cost_centers {
        let split = if cc.is_shared_bucket {
            "(bucket)".to_string()
        } else {
            cc.default_split_percentage
                .map_or_else(|| "-".to_string(), |p| format!("{:.1}%", p))
        };
        let status = if cc.is_active { "active" } else { "inactive" };

        output.push_str(&format!(
            "{:<width$}  {:>13}  {:<8}  {}\n",
            cc.name,
            split,
            status,
            cc.id,
            width = name_width
        ));
    }

    output
}
