use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::scanner::ScanRow;

const HEADER: [&str; 6] = [
    "Competition",
    "Match",
    "Home win (%)",
    "Away win (%)",
    "Gap (%)",
    "Kickoff (UTC)",
];

/// Writes the scanner rows to a single "Scan" sheet.
pub fn export_scan_rows(path: &Path, rows: &[ScanRow]) -> Result<usize> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Scan")?;
        write_header(sheet)?;
        for (idx, row) in rows.iter().enumerate() {
            write_row(sheet, idx as u32 + 1, row)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(rows.len())
}

fn write_header(sheet: &mut Worksheet) -> Result<()> {
    for (col, title) in HEADER.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *title)
            .with_context(|| format!("write header cell {col}"))?;
    }
    Ok(())
}

fn write_row(sheet: &mut Worksheet, r: u32, row: &ScanRow) -> Result<()> {
    sheet
        .write_string(r, 0, &row.competition)
        .and_then(|s| s.write_string(r, 1, &row.match_label))
        .and_then(|s| s.write_number(r, 2, row.p_home_pct))
        .and_then(|s| s.write_number(r, 3, row.p_away_pct))
        .and_then(|s| s.write_number(r, 4, row.diff_pct))
        .and_then(|s| s.write_string(r, 5, &row.kickoff))
        .with_context(|| format!("write row {r}"))?;
    Ok(())
}
