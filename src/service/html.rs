//! HTML export of the record table.
//!
//! Renders a self-contained `<table>` fragment: one header row, one data
//! row per record, display-formatted dates, no row-index or id column.
//! Cell text is escaped, comments keep their line breaks as `<br>`.

use crate::domain::LodgeRecord;
use crate::domain::dates;

/// Column captions of the exported table, in render order.
const COLUMNS: [&str; 5] = ["Name", "Occupation", "Lodge Date", "Grant Date", "Comments"];

/// Renders the table as an HTML fragment suitable for the `table.html`
/// download artifact.
#[must_use]
pub fn render_table(records: &[LodgeRecord]) -> String {
    let mut out = String::from("<table border=\"1\" class=\"lodge-ledger\">\n  <thead>\n    <tr>");
    for column in COLUMNS {
        out.push_str("<th>");
        out.push_str(column);
        out.push_str("</th>");
    }
    out.push_str("</tr>\n  </thead>\n  <tbody>\n");

    for record in records {
        out.push_str("    <tr>");
        push_cell(&mut out, &record.name);
        push_cell(&mut out, &record.occupation);
        push_cell(&mut out, &dates::format_display(record.lodge_date));
        push_cell(&mut out, &dates::format_grant_display(record.grant_date));
        push_comment_cell(&mut out, &record.comments);
        out.push_str("</tr>\n");
    }

    out.push_str("  </tbody>\n</table>\n");
    out
}

fn push_cell(out: &mut String, text: &str) {
    out.push_str("<td>");
    out.push_str(&escape(text));
    out.push_str("</td>");
}

/// Comments may span multiple lines; keep the breaks visible.
fn push_comment_cell(out: &mut String, text: &str) {
    out.push_str("<td>");
    let escaped = escape(text);
    out.push_str(&escaped.replace('\n', "<br>"));
    out.push_str("</td>");
}

/// Escapes text for use inside an HTML element.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::RecordId;
    use chrono::NaiveDate;

    fn record(name: &str) -> LodgeRecord {
        LodgeRecord {
            id: RecordId::new(),
            name: name.to_string(),
            occupation: "Clerk".to_string(),
            lodge_date: NaiveDate::from_ymd_opt(2024, 7, 12).unwrap_or_default(),
            grant_date: None,
            comments: "urgent".to_string(),
        }
    }

    #[test]
    fn empty_table_has_header_and_no_data_rows() {
        let html = render_table(&[]);
        assert!(html.contains("<th>Name</th>"));
        assert!(html.contains("<th>Grant Date</th>"));
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn renders_record_cells() {
        let html = render_table(&[record("A. Smith")]);
        assert!(html.contains("<td>A. Smith</td>"));
        assert!(html.contains("<td>Clerk</td>"));
        assert!(html.contains("<td>12 July, 2024</td>"));
        assert!(html.contains("<td>None</td>"));
        assert!(html.contains("<td>urgent</td>"));
    }

    #[test]
    fn no_index_or_id_column() {
        let rec = record("A. Smith");
        let id = rec.id.to_string();
        let html = render_table(&[rec]);
        assert!(!html.contains(&id));
        assert!(!html.contains("<th>Id</th>"));
        assert!(!html.contains("<th>#</th>"));
    }

    #[test]
    fn escapes_markup_in_cells() {
        let mut rec = record("<script>alert('x')</script>");
        rec.comments = "a & b\nsecond \"line\"".to_string();
        let html = render_table(&[rec]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b<br>second &quot;line&quot;"));
    }

    #[test]
    fn grant_date_renders_when_present() {
        let mut rec = record("A. Smith");
        rec.grant_date = NaiveDate::from_ymd_opt(2024, 8, 1);
        let html = render_table(&[rec]);
        assert!(html.contains("<td>1 August, 2024</td>"));
    }
}
