use crate::model::{RecordSet, StorageError};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::{Path, PathBuf};

const HEADERS: [&str; 8] = [
    "name",
    "symbol",
    "current_price",
    "market_cap",
    "trading_volume_24h",
    "price_change_24h",
    "last_updated",
    "data_refresh_time",
];

/// Writes the latest snapshot to a single-sheet workbook, replacing the file.
pub struct XlsxExporter {
    path: PathBuf,
}

impl XlsxExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw values go out unformatted; NaN and missing changes are left blank.
    pub fn export(&self, records: &RecordSet) -> Result<(), StorageError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = (i + 1) as u32;
            worksheet.write_string(row, 0, record.name.as_str())?;
            worksheet.write_string(row, 1, record.symbol.as_str())?;
            write_number(worksheet, row, 2, Some(record.current_price))?;
            write_number(worksheet, row, 3, Some(record.market_cap))?;
            write_number(worksheet, row, 4, Some(record.trading_volume_24h))?;
            write_number(worksheet, row, 5, record.price_change_24h)?;
            worksheet.write_string(row, 6, record.last_updated.as_str())?;
            worksheet.write_string(row, 7, record.data_refresh_time.as_str())?;
        }

        workbook.save(&self.path)?;
        Ok(())
    }
}

fn write_number(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
) -> Result<(), StorageError> {
    if let Some(value) = value.filter(|v| v.is_finite()) {
        worksheet.write_number(row, col, value)?;
    }
    Ok(())
}
