//! CSV writing
//!
//! Standard comma-separated output: fields containing a comma, quote or
//! line break are quoted, embedded quotes are doubled. UTF-8, one line
//! per row, no trailing separator.

use crate::scrape::Row;
use std::io::{self, Write};

/// Writes all rows, header first, to `w`.
pub fn write_csv<W: Write>(w: &mut W, rows: &[Row]) -> io::Result<()> {
    for row in rows {
        write_row(w, row)?;
    }
    Ok(())
}

/// Writes a single CSV row.
pub fn write_row<W: Write>(w: &mut W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn written(rows: &[Vec<String>]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_fields() {
        assert_eq!(written(&[row(&["H1", "H2"]), row(&["a", "b"])]), "H1,H2\na,b\n");
    }

    #[test]
    fn test_field_with_comma_is_quoted() {
        assert_eq!(written(&[row(&["Editor, author", "x"])]), "\"Editor, author\",x\n");
    }

    #[test]
    fn test_embedded_quote_is_doubled() {
        assert_eq!(written(&[row(&[r#"say "hi""#])]), "\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_field_with_newline_is_quoted() {
        assert_eq!(written(&[row(&["a\nb"])]), "\"a\nb\"\n");
    }

    #[test]
    fn test_empty_row_is_blank_line() {
        assert_eq!(written(&[row(&[])]), "\n");
    }
}
