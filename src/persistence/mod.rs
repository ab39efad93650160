//! Map files
//!
//! A map is stored as plain text, one wall per line, four comma separated
//! integers `start_x,start_y,end_x,end_y` and no header. Blank lines are
//! skipped. Nothing checks for duplicate or crossing walls.

use std::fs;
use std::path::Path;

use crate::error::MapFileError;

/// Parse wall records from map file contents
pub fn parse_wall_records(source: &str) -> Result<Vec<[i32; 4]>, MapFileError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_record(index + 1, line))
        .collect()
}

fn parse_record(line_no: usize, line: &str) -> Result<[i32; 4], MapFileError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(MapFileError::Parse {
            line: line_no,
            reason: format!("expected 4 fields, found {}", fields.len()),
        });
    }

    let mut record = [0i32; 4];
    for (slot, field) in record.iter_mut().zip(&fields) {
        *slot = field.parse::<i32>().map_err(|err| MapFileError::Parse {
            line: line_no,
            reason: format!("'{}': {}", field, err),
        })?;
    }
    Ok(record)
}

/// Render wall records in map file format
pub fn format_wall_records(records: &[[i32; 4]]) -> String {
    records
        .iter()
        .map(|[sx, sy, ex, ey]| format!("{},{},{},{}\n", sx, sy, ex, ey))
        .collect()
}

pub fn load_wall_records(path: &Path) -> Result<Vec<[i32; 4]>, MapFileError> {
    let source = fs::read_to_string(path)?;
    parse_wall_records(&source)
}

pub fn save_wall_records(path: &Path, records: &[[i32; 4]]) -> Result<(), MapFileError> {
    fs::write(path, format_wall_records(records))?;
    Ok(())
}
