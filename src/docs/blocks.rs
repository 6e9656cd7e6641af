//! Documentation Block Classification
//!
//! First half of the renderer: a line-classification pass that turns the
//! constrained documentation dialect into a flat sequence of typed blocks.
//! The HTML pass in `html.rs` never touches source text, so precedence rules
//! live entirely here and are testable in isolation.
//!
//! Classification precedence per line: table run, blank, heading, blockquote,
//! list item, raw tag passthrough, paragraph. Consecutive list items coalesce
//! into one list block; consecutive plain lines coalesce into one paragraph.

/// One typed block of documentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with source level 1..=3 (`#` count)
    Heading { level: u8, text: String },
    /// Blank-line delimited run of plain lines
    Paragraph { lines: Vec<String> },
    /// Coalesced unordered list items
    List { items: Vec<String> },
    /// One quoted line (`>` or `&gt;` prefix)
    Blockquote { text: String },
    /// Pipe-table: header rows (if any) and body rows of cells
    Table {
        header: Vec<Vec<String>>,
        body: Vec<Vec<String>>,
    },
    /// Line opening with a markup tag, passed through untouched
    Raw { line: String },
}

/// Classify documentation source into typed blocks
pub fn classify(source: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut list: Vec<String> = Vec::new();
    let mut table: Vec<String> = Vec::new();

    for raw_line in source.lines() {
        let line = raw_line.trim();

        // Table runs are contiguous; any non-pipe line ends the run
        if line.starts_with('|') {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list, &mut blocks);
            table.push(line.to_string());
            continue;
        }
        flush_table(&mut table, &mut blocks);

        if line.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list, &mut blocks);
        } else if let Some(block) = classify_heading(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list, &mut blocks);
            blocks.push(block);
        } else if let Some(text) = strip_blockquote(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list, &mut blocks);
            blocks.push(Block::Blockquote {
                text: text.to_string(),
            });
        } else if let Some(item) = strip_list_marker(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            list.push(item.to_string());
        } else if line.starts_with('<') {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list, &mut blocks);
            blocks.push(Block::Raw {
                line: line.to_string(),
            });
        } else {
            flush_list(&mut list, &mut blocks);
            paragraph.push(line.to_string());
        }
    }

    flush_table(&mut table, &mut blocks);
    flush_paragraph(&mut paragraph, &mut blocks);
    flush_list(&mut list, &mut blocks);

    blocks
}

fn classify_heading(line: &str) -> Option<Block> {
    // Deepest prefix first so "###" is not consumed by the "#" rule
    for level in (1..=3u8).rev() {
        let marker = "#".repeat(level as usize);
        if let Some(rest) = line.strip_prefix(&marker) {
            if let Some(text) = rest.strip_prefix(' ') {
                return Some(Block::Heading {
                    level,
                    text: text.trim().to_string(),
                });
            }
        }
    }
    None
}

fn strip_blockquote(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix("&gt;")
        .or_else(|| line.strip_prefix('>'))?;
    Some(rest.trim_start())
}

fn strip_list_marker(line: &str) -> Option<&str> {
    // Marker must be followed by a space, so "*emphasis*" stays inline text
    line.strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
        .map(str::trim_start)
}

fn flush_paragraph(paragraph: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph {
            lines: std::mem::take(paragraph),
        });
    }
}

fn flush_list(list: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if !list.is_empty() {
        blocks.push(Block::List {
            items: std::mem::take(list),
        });
    }
}

fn flush_table(table: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if !table.is_empty() {
        blocks.push(parse_table(&std::mem::take(table)));
    }
}

/// Split a contiguous pipe-line run into header and body rows.
///
/// A line is a header row iff the NEXT line is a separator row; separator
/// rows themselves are dropped. Known limitation, preserved from the
/// documented dialect: a single-row table has no following separator and is
/// classified as all body, and a malformed separator line degrades into an
/// ordinary body row instead of splitting the table.
fn parse_table(lines: &[String]) -> Block {
    let mut header = Vec::new();
    let mut body = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if is_separator_row(line) {
            continue;
        }
        let next_is_separator = lines
            .get(i + 1)
            .map(|next| is_separator_row(next))
            .unwrap_or(false);

        if next_is_separator {
            header.push(split_cells(line));
        } else {
            body.push(split_cells(line));
        }
    }

    Block::Table { header, body }
}

/// Cells of one pipe-delimited row, outer pipes stripped, cells trimmed
fn split_cells(line: &str) -> Vec<String> {
    let inner = line
        .trim()
        .trim_start_matches('|')
        .trim_end_matches('|');
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Separator rows have every cell matching `:?-+:?`
fn is_separator_row(line: &str) -> bool {
    let cells = split_cells(line);
    !cells.is_empty() && cells.iter().all(|cell| is_separator_cell(cell))
}

fn is_separator_cell(cell: &str) -> bool {
    let cell = cell.strip_prefix(':').unwrap_or(cell);
    let cell = cell.strip_suffix(':').unwrap_or(cell);
    !cell.is_empty() && cell.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        let blocks = classify("# one\n## two\n### three");

        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, text: "one".into() },
                Block::Heading { level: 2, text: "two".into() },
                Block::Heading { level: 3, text: "three".into() },
            ]
        );
    }

    #[test]
    fn test_hash_without_space_is_paragraph_text() {
        let blocks = classify("#tag");

        assert_eq!(
            blocks,
            vec![Block::Paragraph { lines: vec!["#tag".into()] }]
        );
    }

    #[test]
    fn test_paragraph_groups_until_blank_line() {
        let blocks = classify("first line\nsecond line\n\nnext para");

        assert_eq!(
            blocks,
            vec![
                Block::Paragraph {
                    lines: vec!["first line".into(), "second line".into()]
                },
                Block::Paragraph { lines: vec!["next para".into()] },
            ]
        );
    }

    #[test]
    fn test_list_items_coalesce() {
        let blocks = classify("* one\n- two\n* three\n\n* apart");

        assert_eq!(
            blocks,
            vec![
                Block::List {
                    items: vec!["one".into(), "two".into(), "three".into()]
                },
                Block::List { items: vec!["apart".into()] },
            ]
        );
    }

    #[test]
    fn test_blockquote_plain_and_escaped() {
        let blocks = classify("> quoted\n&gt; escaped quoted");

        assert_eq!(
            blocks,
            vec![
                Block::Blockquote { text: "quoted".into() },
                Block::Blockquote { text: "escaped quoted".into() },
            ]
        );
    }

    #[test]
    fn test_table_header_body_split() {
        let blocks = classify("| 약제 | 용량 |\n| --- | :---: |\n| A | 10ml |\n| B | 20ml |");

        assert_eq!(
            blocks,
            vec![Block::Table {
                header: vec![vec!["약제".into(), "용량".into()]],
                body: vec![
                    vec!["A".into(), "10ml".into()],
                    vec!["B".into(), "20ml".into()],
                ],
            }]
        );
    }

    #[test]
    fn test_single_row_table_is_all_body() {
        // Known limitation: no separator follows, so the row cannot be
        // recognized as a header
        let blocks = classify("| only | row |");

        assert_eq!(
            blocks,
            vec![Block::Table {
                header: vec![],
                body: vec![vec!["only".into(), "row".into()]],
            }]
        );
    }

    #[test]
    fn test_malformed_separator_degrades_to_body() {
        // "-x-" is not a separator cell, so the would-be header and the
        // malformed line both land in the body
        let blocks = classify("| a | b |\n| -x- | --- |\n| c | d |");

        assert_eq!(
            blocks,
            vec![Block::Table {
                header: vec![],
                body: vec![
                    vec!["a".into(), "b".into()],
                    vec!["-x-".into(), "---".into()],
                    vec!["c".into(), "d".into()],
                ],
            }]
        );
    }

    #[test]
    fn test_raw_tag_line_passes_through() {
        let blocks = classify("<img src=\"leaf.png\">");

        assert_eq!(
            blocks,
            vec![Block::Raw { line: "<img src=\"leaf.png\">".into() }]
        );
    }

    #[test]
    fn test_table_run_ends_at_non_pipe_line() {
        let blocks = classify("| a |\ntext after");

        assert_eq!(
            blocks,
            vec![
                Block::Table { header: vec![], body: vec![vec!["a".into()]] },
                Block::Paragraph { lines: vec!["text after".into()] },
            ]
        );
    }
}
