//! Permissive CSV sheet parsing for translation imports.
//!
//! Published spreadsheets are messier than RFC 4180: the delimiter may be a
//! comma or a pipe, quoted fields may contain literal newlines, and blank
//! rows appear between sections. This parser mirrors that tolerance instead
//! of the strict reader offered by the `csv` crate, which is still used for
//! the writing side (see [`crate::table::TranslationTable::to_csv_writer`]).

use crate::error::Error;

const BOM: char = '\u{FEFF}';

/// Picks the field delimiter by inspecting the header row: pipe when
/// present, comma otherwise.
pub fn sniff_delimiter(header: &str) -> char {
    if header.contains('|') { '|' } else { ',' }
}

/// Parses raw sheet text into rows of fields.
///
/// The header row is always the first element of the result. Data rows that
/// are empty after trimming are skipped entirely. When `delimiter` is
/// `None`, it is sniffed from the header row.
///
/// # Errors
///
/// - [`Error::TooFewRows`] when there is no data row after the header.
/// - [`Error::TooFewColumns`] when the header has fewer than three fields
///   (key column plus at least two language columns).
pub fn parse(text: &str, delimiter: Option<char>) -> Result<Vec<Vec<String>>, Error> {
    let text = text.trim_start_matches(BOM).replace("\r\n", "\n").replace('\r', "\n");
    let lines = split_rows(&text);
    if lines.len() < 2 {
        return Err(Error::TooFewRows(lines.len()));
    }

    let header_line = lines[0].trim();
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(header_line));
    let header = split_fields(header_line, delimiter);
    if header.len() < 3 {
        return Err(Error::TooFewColumns(header.len()));
    }

    let mut rows = Vec::with_capacity(lines.len());
    rows.push(header);
    for line in &lines[1..] {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        rows.push(split_fields(line, delimiter));
    }
    Ok(rows)
}

/// Splits text into physical rows at newlines outside quoted fields, so a
/// literal newline inside a quoted field does not start a new row. A
/// trailing empty row (from a trailing newline) is dropped.
fn split_rows(text: &str) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in text.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '\n' if !in_quotes => {
                rows.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Splits one row into fields at the delimiter outside quotes. `""` inside
/// a quoted field unescapes to a literal `"`; the enclosing quote marks are
/// consumed, not stored.
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if c == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_simple_sheet() {
        let text = indoc! {"
            Key,ru,en
            greeting,Привет,Hello
            farewell,Пока,Bye
        "};
        let rows = parse(text, None).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Key", "ru", "en"]);
        assert_eq!(rows[1], vec!["greeting", "Привет", "Hello"]);
        assert_eq!(rows[2], vec!["farewell", "Пока", "Bye"]);
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("Key|ru|en"), '|');
        assert_eq!(sniff_delimiter("Key,ru,en"), ',');
    }

    #[test]
    fn test_parse_pipe_delimited_sheet() {
        let rows = parse("Key|ru|en\nok|Да|Yes\n", None).unwrap();
        assert_eq!(rows[1], vec!["ok", "Да", "Yes"]);
    }

    #[test]
    fn test_explicit_delimiter_overrides_sniffing() {
        // Pipe in the header would normally win; the caller forces comma.
        let rows = parse("Key,a|b,en\nk,x,y\n", Some(',')).unwrap();
        assert_eq!(rows[0], vec!["Key", "a|b", "en"]);
    }

    #[test]
    fn test_quoted_field_with_delimiter_and_escaped_quote() {
        let rows = parse("Key,ru,en\nk,\"a,b\"\"c\",plain\n", None).unwrap();
        assert_eq!(rows[1], vec!["k", "a,b\"c", "plain"]);
    }

    #[test]
    fn test_quoted_field_with_embedded_newline() {
        let rows = parse("Key,ru,en\nk,\"line one\nline two\",x\n", None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], "line one\nline two");
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let text = "Key,ru,en\n\n   \nk,a,b\n\n";
        let rows = parse(text, None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["k", "a", "b"]);
    }

    #[test]
    fn test_bom_and_crlf_normalization() {
        let text = "\u{FEFF}Key,ru,en\r\nk,a,b\r";
        let rows = parse(text, None).unwrap();
        assert_eq!(rows[0][0], "Key");
        assert_eq!(rows[1], vec!["k", "a", "b"]);
    }

    #[test]
    fn test_too_few_rows() {
        let error = parse("Key,ru,en\n", None).unwrap_err();
        assert!(matches!(error, Error::TooFewRows(1)));
    }

    #[test]
    fn test_too_few_columns() {
        let error = parse("Key,en\nk,a\n", None).unwrap_err();
        assert!(matches!(error, Error::TooFewColumns(2)));
    }

    #[test]
    fn test_extra_columns_are_preserved_by_parser() {
        // The parser keeps all fields; the table decides how many to use.
        let rows = parse("Key,ru,en,comment\nk,a,b,ignored\n", None).unwrap();
        assert_eq!(rows[1].len(), 4);
    }

    #[test]
    fn test_unterminated_quote_swallows_rest_of_input() {
        // Degenerate input: an open quote keeps the rest of the text in one
        // row, matching the permissive toggle semantics.
        let rows = parse("Key,ru,en\nk,\"open,b\nnext,x,y\n", None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "k");
    }
}
