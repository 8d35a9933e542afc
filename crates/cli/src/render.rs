//! Fixed-width table rendering for `list`.

use models::TodoItem;

const COLUMN_WIDTH: usize = 30;

/// Shorten a cell longer than 30 characters to `keep` characters plus a
/// `...` marker. The title keeps 27 so it stays within its column; the
/// description is the last column and keeps the full 30.
fn truncate(text: &str, keep: usize) -> String {
    if text.chars().count() > COLUMN_WIDTH {
        let kept: String = text.chars().take(keep).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// Render the item table, or the empty-store message.
pub fn render_list(items: &[TodoItem]) -> String {
    if items.is_empty() {
        return "No todo items found.".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<8} {:<30} {}\n",
        "ID", "Status", "Title", "Description"
    ));
    out.push_str(&"-".repeat(70));
    for item in items {
        let status = if item.completed { "[X]" } else { "[ ]" };
        out.push('\n');
        out.push_str(&format!(
            "{:<4} {:<8} {:<30} {}",
            item.id,
            status,
            truncate(&item.title, 27),
            truncate(&item.description, 30)
        ));
    }
    out
}
