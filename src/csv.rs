// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant). Blank lines are skipped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    parse_records(text, sep).into_iter().map(|(_, row)| row).collect()
}

/// Like [`parse_rows`], with the 1-based physical line each row starts on.
pub fn parse_records(text: &str, sep: char) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    records.push((row_start, take(&mut row)));
                } else {
                    row.clear();
                }
                line += 1;
                row_start = line;
            }
            _ => {
                if ch == '\n' { line += 1; } // newline inside a quoted field
                field.push(ch);
            }
        }
    }

    // Flush a trailing row that has no final newline.
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        records.push((row_start, row));
    }

    records
}

/// Data rows of a registry file: everything after the header line.
pub fn data_rows(text: &str, sep: char) -> impl Iterator<Item = Vec<String>> {
    parse_rows(text, sep).into_iter().skip(1)
}

/// [`data_rows`] with their physical line numbers.
pub fn data_records(text: &str, sep: char) -> impl Iterator<Item = (usize, Vec<String>)> {
    parse_records(text, sep).into_iter().skip(1)
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header line plus rows, as one string.
pub fn rows_to_string<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>], sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    // Writing into a Vec<u8> cannot fail.
    let _ = write_row(&mut buf, headers, sep);
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
