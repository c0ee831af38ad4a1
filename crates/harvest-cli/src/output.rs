//! CSV persistence for harvested records.
//!
//! Files are UTF-8 with a leading byte-order mark so spreadsheet tools pick
//! the right encoding for Korean text. Absent values become empty cells.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use harvest_scraper::{BookRecord, StoreRecord};

pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Creates `path` (and any missing parent directories) and hands a buffered
/// writer to `write`.
///
/// # Errors
///
/// Returns an error if the location is not writable or `write` fails.
pub(crate) fn save<F>(path: &Path, write: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> anyhow::Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out).with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

/// Writes books with one column per [`BookRecord`] field, in field order.
pub(crate) fn write_books<W: Write>(mut out: W, books: &[BookRecord]) -> anyhow::Result<()> {
    out.write_all(UTF8_BOM)?;
    let mut writer = csv::Writer::from_writer(out);
    for book in books {
        writer.serialize(book)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes stores with the union of their fields as columns.
pub(crate) fn write_stores<W: Write>(mut out: W, stores: &[StoreRecord]) -> anyhow::Result<()> {
    out.write_all(UTF8_BOM)?;
    let columns = store_columns(stores);
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&columns)?;
    for store in stores {
        writer.write_record(columns.iter().map(|column| store.cell(column)))?;
    }
    writer.flush()?;
    Ok(())
}

/// Every field name seen across `stores`, in first-seen order.
pub(crate) fn store_columns(stores: &[StoreRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    stores
        .iter()
        .flat_map(StoreRecord::field_names)
        .filter(|name| seen.insert(*name))
        .collect()
}
