//! Minimal reader/writer for the header-addressed, tab-separated tables the
//! game exporter produces.

use std::fs;
use std::path::Path;

use super::error::StorageError;

/// A typed row of one table.
///
/// `COLUMNS` names the fixed schema. Columns are addressed by header name,
/// not position, and every row is validated as it is parsed.
pub(crate) trait TableRow: Sized {
    const COLUMNS: &'static [&'static str];

    /// Builds a row from field values given in `COLUMNS` order.
    fn from_fields(fields: &[&str]) -> Result<Self, String>;

    /// Field values in `COLUMNS` order.
    fn to_fields(&self) -> Vec<String>;
}

/// Reads a table, returning `None` if the file does not exist.
pub(crate) fn read_table_opt<R: TableRow>(path: &Path) -> Result<Option<Vec<R>>, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StorageError::io(path, err)),
    };
    parse_table(path, &content).map(Some)
}

fn parse_table<R: TableRow>(path: &Path, content: &str) -> Result<Vec<R>, StorageError> {
    let mut lines = content.lines().map(|l| l.trim_end_matches('\r')).enumerate();

    let (_, header) = lines.next().ok_or_else(|| StorageError::Row {
        file: path.to_path_buf(),
        line: 1,
        message: "missing header row".to_string(),
    })?;
    let headers: Vec<&str> = header.split('\t').collect();

    let mut indices = Vec::with_capacity(R::COLUMNS.len());
    for &column in R::COLUMNS {
        let index = headers
            .iter()
            .position(|h| *h == column)
            .ok_or(StorageError::MissingColumn {
                file: path.to_path_buf(),
                column,
            })?;
        indices.push(index);
    }

    let mut rows = Vec::new();
    for (number, line) in lines {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let mut selected = Vec::with_capacity(indices.len());
        for (&index, &column) in indices.iter().zip(R::COLUMNS) {
            let field = fields.get(index).ok_or_else(|| StorageError::Row {
                file: path.to_path_buf(),
                line: number + 1,
                message: format!("missing field '{column}'"),
            })?;
            selected.push(*field);
        }
        let row = R::from_fields(&selected).map_err(|message| StorageError::Row {
            file: path.to_path_buf(),
            line: number + 1,
            message,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

pub(crate) fn write_table<R: TableRow>(path: &Path, rows: &[R]) -> Result<(), StorageError> {
    let mut out = String::new();
    out.push_str(&R::COLUMNS.join("\t"));
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_fields().join("\t"));
        out.push('\n');
    }
    fs::write(path, out).map_err(|err| StorageError::io(path, err))
}
