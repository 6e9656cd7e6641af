//! Documentation HTML Rendering
//!
//! Second half of the renderer: a pure pass over classified blocks that emits
//! HTML fragments. Heading weights follow the display policy: `#` and `##`
//! both render as `<h2>`, `###` as the lower-weight `<h3>`.
//!
//! No escaping is performed beyond the supported constructs. The renderer is
//! only fed operator-curated documentation files, never user-supplied text.

use std::fmt::Write;

use super::blocks::{classify, Block};

/// Render documentation source to HTML. Pure and deterministic.
pub fn render(source: &str) -> String {
    let mut out = String::new();
    for block in classify(source) {
        if !out.is_empty() {
            out.push('\n');
        }
        write_block(&mut out, &block);
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, text } => {
            let tag = heading_tag(*level);
            let _ = write!(out, "<{}>{}</{}>", tag, emphasize(text), tag);
        }
        Block::Paragraph { lines } => {
            let body: Vec<String> = lines.iter().map(|line| emphasize(line)).collect();
            let _ = write!(out, "<p>{}</p>", body.join("<br />"));
        }
        Block::List { items } => {
            out.push_str("<ul>");
            for item in items {
                let _ = write!(out, "<li>{}</li>", emphasize(item));
            }
            out.push_str("</ul>");
        }
        Block::Blockquote { text } => {
            let _ = write!(out, "<blockquote>{}</blockquote>", emphasize(text));
        }
        Block::Table { header, body } => {
            out.push_str("<table>");
            if !header.is_empty() {
                out.push_str("<thead>");
                for row in header {
                    write_row(out, row, "th");
                }
                out.push_str("</thead>");
            }
            out.push_str("<tbody>");
            for row in body {
                write_row(out, row, "td");
            }
            out.push_str("</tbody></table>");
        }
        Block::Raw { line } => out.push_str(line),
    }
}

/// `#`/`##` collapse to one weight, `###` to a lower one. Higher `#` count
/// never gains visual weight.
fn heading_tag(level: u8) -> &'static str {
    match level {
        1 | 2 => "h2",
        _ => "h3",
    }
}

fn write_row(out: &mut String, cells: &[String], cell_tag: &str) {
    out.push_str("<tr>");
    for cell in cells {
        let _ = write!(out, "<{}>{}</{}>", cell_tag, emphasize(cell), cell_tag);
    }
    out.push_str("</tr>");
}

/// Apply inline emphasis: bold (`**`) before italic (`*`), so the italic rule
/// cannot consume one asterisk of a bold pair
fn emphasize(text: &str) -> String {
    let bolded = wrap_spans(text, "**", "strong");
    wrap_spans(&bolded, "*", "em")
}

/// Wrap each balanced delimiter pair in `<tag>..</tag>`. Unbalanced or
/// empty spans stay literal.
fn wrap_spans(text: &str, delim: &str, tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(delim) {
        let after_open = &rest[open + delim.len()..];
        match after_open.find(delim) {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                let _ = write!(out, "<{}>{}</{}>", tag, &after_open[..close], tag);
                rest = &after_open[close + delim.len()..];
            }
            _ => {
                // No closing marker (or empty span): emit the opener
                // literally and keep scanning
                out.push_str(&rest[..open + delim.len()]);
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}
