// ABOUTME: HTML access helpers: anchor collection, line-preserving visible text, table rows, PDF discovery.
// ABOUTME: Thin wrappers over scraper so the rest of the pipeline works on plain strings.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::links::{is_pdf_href, resolve_href, Anchor};
use crate::text::clean;

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// Collects every anchor with an href, in document order.
pub fn collect_anchors(doc: &Html) -> Vec<Anchor> {
    doc.select(&ANCHOR_SELECTOR)
        .filter_map(|el| {
            let href = el.value().attr("href")?;
            let text: String = el.text().collect::<Vec<_>>().join(" ");
            Some(Anchor::new(text, href))
        })
        .collect()
}

/// Extracts the page's visible text with one line per text node, skipping
/// script/style/noscript content. The line structure is what the date-field
/// extractor keys on.
pub fn visible_text(doc: &Html) -> String {
    let mut out = String::new();
    for node in doc.root_element().descendants() {
        let text = match node.value().as_text() {
            Some(t) => t,
            None => continue,
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            out.push_str(trimmed);
            out.push('\n');
        }
    }
    out
}

/// Returns the data rows of the page's first table as cleaned cell text
/// (header row skipped, cells capped at `cell_cap` chars). No table yields an
/// empty vec.
pub fn calendar_rows(doc: &Html, cell_cap: usize) -> Vec<Vec<String>> {
    let table = match doc.select(&TABLE_SELECTOR).next() {
        Some(t) => t,
        None => return Vec::new(),
    };
    table
        .select(&ROW_SELECTOR)
        .skip(1)
        .map(|row| {
            row.select(&CELL_SELECTOR)
                .map(|td| clean(&td.text().collect::<String>(), cell_cap))
                .collect()
        })
        .collect()
}

/// Finds the first PDF link on a page, resolved against the base URL.
pub fn first_pdf_link(doc: &Html, base_url: &str) -> Option<String> {
    doc.select(&ANCHOR_SELECTOR)
        .filter_map(|el| el.value().attr("href"))
        .find(|href| is_pdf_href(href))
        .map(|href| resolve_href(base_url, href))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collects_anchors_in_document_order() {
        let doc = Html::parse_document(
            r#"<ul>
                <li><a href="/a">First <b>Link</b></a></li>
                <li><a href="/b">Second</a></li>
                <li><a>no href</a></li>
            </ul>"#,
        );
        let anchors = collect_anchors(&doc);
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].href, "/a");
        assert_eq!(clean(&anchors[0].text, 0), "First Link");
        assert_eq!(anchors[1].href, "/b");
    }

    #[test]
    fn visible_text_preserves_block_lines_and_skips_scripts() {
        let doc = Html::parse_document(
            r#"<body>
                <p>Last Date: 31/12/2026</p>
                <p>Exam Date: 15 Feb 2027</p>
                <script>var lastDate = "01/01/1999";</script>
            </body>"#,
        );
        let text = visible_text(&doc);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["Last Date: 31/12/2026", "Exam Date: 15 Feb 2027"]);
    }

    #[test]
    fn calendar_rows_skip_header_and_cap_cells() {
        let doc = Html::parse_document(
            r#"<table>
                <tr><th>Exam</th><th>Date</th></tr>
                <tr><td>SSC CGL 2026</td><td>15-03-2026</td></tr>
                <tr><td></td><td>SSC CHSL 2026</td></tr>
            </table>"#,
        );
        let rows = calendar_rows(&doc, 200);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["SSC CGL 2026", "15-03-2026"]);
        assert_eq!(rows[1], vec!["", "SSC CHSL 2026"]);
    }

    #[test]
    fn no_table_yields_no_rows() {
        let doc = Html::parse_document("<p>nothing here</p>");
        assert!(calendar_rows(&doc, 200).is_empty());
    }

    #[test]
    fn first_pdf_link_resolves_against_base() {
        let doc = Html::parse_document(
            r#"<a href="/page.html">page</a>
               <a href="docs/notice.pdf">notice</a>
               <a href="/docs/second.pdf">second</a>"#,
        );
        let pdf = first_pdf_link(&doc, "https://ssc.nic.in");
        assert_eq!(pdf, Some("https://ssc.nic.in/docs/notice.pdf".to_string()));
    }

    #[test]
    fn no_pdf_yields_none() {
        let doc = Html::parse_document(r#"<a href="/page.html">page</a>"#);
        assert_eq!(first_pdf_link(&doc, "https://ssc.nic.in"), None);
    }
}
