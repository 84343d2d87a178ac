use std::cmp::Reverse;
use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Glyph that opens every paper entry; a line starting with it is a record boundary.
pub const ENTRY_MARKER: &str = "🔹";

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Date:\*\*\s*(\d{4}-\d{2}-\d{2})").unwrap());

/// Locate the body of the titled section: everything after the first line whose
/// trimmed text equals `title`, up to the next heading line or end of file.
pub fn find_section(lines: &[&str], title: &str) -> Option<Range<usize>> {
    let start = lines.iter().position(|line| line.trim() == title)? + 1;
    let end = lines[start..]
        .iter()
        .position(|line| line.starts_with('#'))
        .map_or(lines.len(), |offset| start + offset);
    Some(start..end)
}

/// Split a section body into one string per entry. Lines before the first
/// marker are formatting whitespace and are dropped; trailing blank lines are
/// stripped from each entry so a re-rendered body comes out identical.
pub fn split_entries(body: &[&str]) -> Vec<String> {
    let mut entries: Vec<Vec<&str>> = Vec::new();
    for &line in body {
        if line.starts_with(ENTRY_MARKER) {
            entries.push(vec![line]);
        } else if let Some(current) = entries.last_mut() {
            current.push(line);
        }
    }
    entries
        .into_iter()
        .map(|mut lines| {
            while lines.last().is_some_and(|line| line.trim().is_empty()) {
                lines.pop();
            }
            lines.join("\n")
        })
        .collect()
}

/// Extract the sort key from an entry's labelled date line.
///
/// Entries without a `YYYY-MM-DD` shaped date ("Unknown Date", "TBD") yield
/// None and sort as maximally old. A date that has the right shape but is not
/// a real calendar date is reported and treated the same way.
pub fn entry_date(entry: &str) -> Option<NaiveDate> {
    let captures = DATE_RE.captures(entry)?;
    let raw = &captures[1];
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("Entry carries an invalid date {:?}: {}", raw, e);
            None
        }
    }
}

/// Merge previously written entries with freshly rendered ones, newest first.
/// The sort is stable: entries sharing a date, and all undated entries, keep
/// their relative order, existing before new.
pub fn merge_entries(existing: Vec<String>, new: Vec<String>) -> Vec<String> {
    let mut merged = existing;
    merged.extend(new);
    merged.sort_by_cached_key(|entry| Reverse(entry_date(entry).unwrap_or(NaiveDate::MIN)));
    merged
}

/// Rewrite the titled section of `content` so its body holds the existing
/// entries merged with `new_entries`. Everything outside the section is
/// preserved; a document without the section gets the title appended first.
/// The result always ends with exactly one newline.
pub fn update_section(content: &str, title: &str, new_entries: Vec<String>) -> String {
    let mut lines: Vec<&str> = content.lines().collect();

    let body = match find_section(&lines, title) {
        Some(range) => range,
        None => {
            tracing::info!("Section {:?} not found, appending it", title);
            lines.push(title);
            lines.len()..lines.len()
        }
    };

    let existing = split_entries(&lines[body.clone()]);
    let merged = merge_entries(existing, new_entries);

    let mut rebuilt: Vec<String> = lines[..body.start].iter().map(|s| s.to_string()).collect();
    rebuilt.push(String::new());
    for entry in &merged {
        rebuilt.extend(entry.lines().map(|s| s.to_string()));
        rebuilt.push(String::new());
    }
    rebuilt.extend(lines[body.end..].iter().map(|s| s.to_string()));

    let mut output = rebuilt.join("\n");
    while output.ends_with('\n') {
        output.pop();
    }
    output.push('\n');
    output
}
