// src/table.rs
// Table rendering for export: markdown pipe tables, CSV and TSV.
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Markdown => "md", ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }

    /// Field separator for delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self { ExportFormat::Markdown => None, ExportFormat::Csv => Some(','), ExportFormat::Tsv => Some('\t') }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(format!("Unknown format: {}", other)),
        }
    }
}

/* ---------------- Delimited ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
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

/* ---------------- Markdown ---------------- */

/// Pipes would end the cell; newlines would end the row.
fn md_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}

pub fn write_md_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    write!(w, "|")?;
    for cell in row {
        write!(w, " {} |", md_cell(cell))?;
    }
    writeln!(w)
}

fn write_md_rule<W: Write>(mut w: W, cols: usize) -> io::Result<()> {
    write!(w, "|")?;
    for _ in 0..cols {
        write!(w, ":---|")?;
    }
    writeln!(w)
}

/* ---------------- Whole tables ---------------- */

/// Render headers + rows. Markdown always gets its header and rule lines;
/// delimited formats get a header line only if `headers` is non-empty.
pub fn render(format: ExportFormat, headers: &[String], rows: &[Vec<String>]) -> String {
    let mut buf: Vec<u8> = Vec::new();

    // Writing into a Vec<u8> cannot fail.
    let _ = match format.delim() {
        None => write_markdown(&mut buf, headers, rows),
        Some(sep) => write_delimited(&mut buf, headers, rows, sep),
    };

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

fn write_markdown<W: Write>(mut w: W, headers: &[String], rows: &[Vec<String>]) -> io::Result<()> {
    let cols = headers.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let mut head = headers.to_vec();
    head.resize(cols, s!());
    write_md_row(&mut w, &head)?;
    write_md_rule(&mut w, cols)?;
    for r in rows {
        write_md_row(&mut w, r)?;
    }
    Ok(())
}

fn write_delimited<W: Write>(mut w: W, headers: &[String], rows: &[Vec<String>], sep: char) -> io::Result<()> {
    if !headers.is_empty() {
        write_row(&mut w, headers, sep)?;
    }
    for r in rows {
        write_row(&mut w, r, sep)?;
    }
    Ok(())
}
