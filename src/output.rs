use std::io::Write;

use dam::{CsvRecord, PageMarker, Pager};
use serde::Serialize;

/// Write the current page as TSV (header + rows) or as a JSON array,
/// followed by the summary footer on TSV output.
pub fn write_page<T, W>(pager: &Pager<T>, json_mode: bool, writer: &mut W) -> std::io::Result<()>
where
    T: CsvRecord + Serialize,
    W: Write,
{
    let rows = pager.visible_slice();

    if json_mode {
        serde_json::to_writer_pretty(&mut *writer, rows)?;
        writer.write_all(b"\n")?;
        return writer.flush();
    }

    writeln!(writer, "{}", T::HEADERS.join("\t"))?;
    for row in rows {
        let cells: Vec<String> = row.row().into_iter().map(|c| tsv_cell(&c)).collect();
        writeln!(writer, "{}", cells.join("\t"))?;
    }
    writeln!(writer)?;
    writeln!(writer, "{}", summary(pager))?;
    if pager.total_pages() > 1 {
        writeln!(writer, "{}", page_strip(pager))?;
    }
    writer.flush()
}

/// "Showing 11 to 20 of 47 (Page 2 of 5)".
pub fn summary<T>(pager: &Pager<T>) -> String {
    let (first, last, total) = pager.showing_range();
    if total == 0 {
        return "No entries found.".to_string();
    }
    let mut line = format!("Showing {first} to {last} of {total}");
    if pager.total_pages() > 1 {
        line.push_str(&format!(
            " (Page {} of {})",
            pager.current_page(),
            pager.total_pages()
        ));
    }
    line
}

/// "1 ... 4 [5] 6 ... 10", with the current page bracketed.
pub fn page_strip<T>(pager: &Pager<T>) -> String {
    pager
        .page_numbers_to_display()
        .into_iter()
        .map(|m| match m {
            PageMarker::Page(p) if p == pager.current_page() => format!("[{p}]"),
            PageMarker::Page(p) => p.to_string(),
            PageMarker::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep a cell on one line and free of column separators.
fn tsv_cell(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}
