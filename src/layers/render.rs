use crate::layers::{PaperDetails, PaperRecord};

/// Render one paper as a markdown list entry.
///
/// Missing fields never fail the render; they fall back to placeholders so a
/// half-described paper still produces a well-formed block.
pub fn render_entry(record: &PaperRecord, details: &PaperDetails) -> String {
    let arxiv_id = details.arxiv_id.as_deref().unwrap_or("N/A");
    let date = record.publication_date.as_deref().unwrap_or("Unknown Date");
    let publisher = match record.venue.as_deref() {
        Some(venue) if !venue.is_empty() => venue,
        _ => "arXiv.org",
    };
    let abstract_text = details
        .abstract_text
        .as_deref()
        .or(record.abstract_text.as_deref())
        .unwrap_or("No abstract available.");

    let mut entry = String::new();
    entry.push_str(&format!("🔹 [{}](https://arxiv.org/abs/{})\n", record.title, arxiv_id));
    entry.push_str(&format!("- 🔗 **arXiv PDF Link:** [Paper Link](https://arxiv.org/pdf/{})\n", arxiv_id));
    entry.push_str(&format!("- 👤 **Authors:** {}\n", record.authors.join(", ")));
    entry.push_str(&format!("- 🗓️ **Date:** {}\n", date));
    entry.push_str(&format!("- 📑 **Publisher:** {}\n", publisher));
    entry.push_str("- 📝 **Abstract:** \n");
    entry.push_str("    <details>\n");
    entry.push_str("    <summary>Expand</summary>\n");
    entry.push_str(&format!("    {}\n", abstract_text));
    entry.push_str("    </details>");
    entry
}
