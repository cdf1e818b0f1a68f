//! Spreadsheet collaborator: the core only ever sees [`Sheet`] values, a
//! named sequence of raw rows. The loader here reads CSV workbooks: a single
//! `.csv` file is a one-sheet workbook named after its file stem, a
//! directory is one sheet per `.csv` file in lexicographic order.

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("bad csv in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("{path}: missing required column {name:?}")]
    MissingHeader { path: PathBuf, name: &'static str },
    #[error("no sheets found under {path}")]
    Empty { path: PathBuf },
}

/// One data row of a table sheet. `pk`, `nullable` and `fk` come from
/// optional marker columns; a non-empty cell is a marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetRow {
    pub name: String,
    pub data_type: String,
    pub pk: bool,
    pub nullable: bool,
    pub fk: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<SheetRow>,
}

/// Load a workbook from `path`: either a single CSV file or a directory of
/// CSV files. Sheet order is file order (lexicographic for a directory).
pub fn load_workbook(path: &Path) -> Result<Vec<Sheet>, SheetError> {
    let io_err = |source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    };

    let meta = fs::metadata(path).map_err(io_err)?;
    if !meta.is_dir() {
        return Ok(vec![load_sheet(path)?]);
    }

    let mut files: Vec<PathBuf> = fs::read_dir(path)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")))
        .collect();
    files.sort();

    let sheets = files
        .iter()
        .map(|file| load_sheet(file))
        .collect::<Result<Vec<_>, _>>()?;
    if sheets.is_empty() {
        return Err(SheetError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(sheets)
}

/// Read one CSV file as a sheet. The header row must contain `name` and
/// `type` (case-insensitive); `pk`, `nullable` and `fk` are optional. Rows
/// with an empty name are skipped.
pub fn load_sheet(path: &Path) -> Result<Sheet, SheetError> {
    let csv_err = |source| SheetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let position = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let required = |name: &'static str| {
        position(name).ok_or(SheetError::MissingHeader {
            path: path.to_path_buf(),
            name,
        })
    };

    let name_idx = required("name")?;
    let type_idx = required("type")?;
    let pk_idx = position("pk");
    let nullable_idx = position("nullable");
    let fk_idx = position("fk");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let name = cell(Some(name_idx));
        if name.is_empty() {
            continue;
        }
        let fk = cell(fk_idx);
        rows.push(SheetRow {
            name: name.to_string(),
            data_type: cell(Some(type_idx)).to_string(),
            pk: !cell(pk_idx).is_empty(),
            nullable: !cell(nullable_idx).is_empty(),
            fk: (!fk.is_empty()).then(|| fk.to_string()),
        });
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Sheet { name, rows })
}
