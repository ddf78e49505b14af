//! HTML rendering of the reconciliation report.
//!
//! Produces a self-contained page suitable for printing from a browser.

use crate::data::ReportData;

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
td{padding:4px 12px;border-bottom:1px solid #ccc}\
td.value{text-align:right;font-family:monospace}\
.meta{color:#555}";

/// Escapes text for element content and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html(data: &ReportData) -> String {
    let title = escape(&data.title);
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );

    if !data.station_name.is_empty() {
        html.push_str(&format!("<h2>{}</h2>\n", escape(&data.station_name)));
    }
    if let Some(period) = data.period_display() {
        html.push_str(&format!(
            "<p class=\"meta\">Control period: {}</p>\n",
            escape(&period)
        ));
    }

    html.push_str("<table>\n");
    for line in &data.lines {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"value\">{}</td></tr>\n",
            escape(&line.label),
            escape(&line.value)
        ));
    }
    html.push_str("</table>\n");

    if !data.notes.is_empty() {
        html.push_str("<ul>\n");
        for note in &data.notes {
            html.push_str(&format!("<li>{}</li>\n", escape(note)));
        }
        html.push_str("</ul>\n");
    }

    html.push_str(&format!(
        "<p class=\"meta\">Generated {}</p>\n</body>\n</html>\n",
        escape(&data.generated_display())
    ));
    html
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::data::ReportLine;

    fn sample() -> ReportData {
        ReportData {
            title: ReportData::TITLE.to_string(),
            station_name: "Fuel & Go <East>".to_string(),
            period_start: "2024-03-01".to_string(),
            period_end: "2024-03-31".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0).unwrap(),
            lines: vec![ReportLine {
                label: "Total Gasoline Sales".to_string(),
                value: "250.00".to_string(),
            }],
            notes: vec!["Check entry: gas tank 1 level '<1' is not a number".to_string()],
        }
    }

    #[test]
    fn escapes_user_text() {
        let html = render_html(&sample());

        assert!(html.contains("<h2>Fuel &amp; Go &lt;East&gt;</h2>"));
        assert!(html.contains("&#39;&lt;1&#39;"));
    }

    #[test]
    fn renders_lines_as_table_rows() {
        let html = render_html(&sample());

        assert!(html.contains(
            "<tr><td>Total Gasoline Sales</td><td class=\"value\">250.00</td></tr>"
        ));
        assert!(html.contains("Control period: 2024-03-01 to 2024-03-31"));
        assert!(html.contains("Generated 2024-04-01 08:30:00 UTC"));
    }

    #[test]
    fn omits_empty_sections() {
        let mut data = sample();
        data.station_name.clear();
        data.notes.clear();

        let html = render_html(&data);

        assert!(!html.contains("<h2>"));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn page_is_complete_document() {
        let html = render_html(&sample());

        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n<head>\n"));
        assert!(html.contains("<title>Fuel Station Report</title>"));
        assert!(html.contains("<h1>Fuel Station Report</h1>"));
        assert!(html.ends_with("</body>\n</html>\n"));
    }
}
