//! In-memory working table.

use crate::error_handling::CheckpointError;
use crate::geocode::Coordinates;

use super::TableSchema;

/// One row of the working table.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    pub address: String,
    pub region: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Raw cells of every other column, in table order
    pub passthrough: Vec<String>,
}

impl AddressRecord {
    /// A record is resolved once both coordinates are stored.
    pub fn is_resolved(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.lat = Some(coordinates.lat);
        self.lon = Some(coordinates.lon);
    }
}

/// Where each output column's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Address,
    Region,
    Lat,
    Lon,
    Passthrough(usize),
}

/// The working table: records in file order plus the column layout needed
/// to write them back exactly as they were read.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressTable {
    headers: Vec<String>,
    layout: Vec<Column>,
    records: Vec<AddressRecord>,
}

impl AddressTable {
    /// Builds a table from a header row and raw data rows.
    ///
    /// Coordinate columns missing from `headers` are appended at the end.
    /// Blank coordinate cells are unresolved; anything else must parse as a
    /// number.
    ///
    /// # Errors
    ///
    /// `MissingColumn` when the address, region or a required column is
    /// absent, `InvalidCoordinate` for a non-numeric coordinate cell.
    pub(crate) fn from_rows(
        schema: &TableSchema,
        mut headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, CheckpointError> {
        for column in [&schema.address, &schema.region]
            .into_iter()
            .chain(schema.required.iter())
        {
            if !headers.iter().any(|h| h == column) {
                return Err(CheckpointError::MissingColumn {
                    column: column.clone(),
                });
            }
        }

        let mut layout = Vec::with_capacity(headers.len() + 2);
        let mut passthrough_count = 0;
        for header in &headers {
            let column = if *header == schema.address && !layout.contains(&Column::Address) {
                Column::Address
            } else if *header == schema.region && !layout.contains(&Column::Region) {
                Column::Region
            } else if *header == schema.lat && !layout.contains(&Column::Lat) {
                Column::Lat
            } else if *header == schema.lon && !layout.contains(&Column::Lon) {
                Column::Lon
            } else {
                passthrough_count += 1;
                Column::Passthrough(passthrough_count - 1)
            };
            layout.push(column);
        }
        let source_width = layout.len();
        for (column, header) in [(Column::Lat, &schema.lat), (Column::Lon, &schema.lon)] {
            if !layout.contains(&column) {
                layout.push(column);
                headers.push(header.clone());
            }
        }

        let mut records = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.into_iter().enumerate() {
            let mut record = AddressRecord {
                address: String::new(),
                region: String::new(),
                lat: None,
                lon: None,
                passthrough: Vec::with_capacity(passthrough_count),
            };
            for (cell, column) in row.into_iter().zip(&layout[..source_width]) {
                match column {
                    Column::Address => record.address = cell,
                    Column::Region => record.region = cell,
                    Column::Lat => {
                        record.lat = parse_coordinate(row_idx, &schema.lat, &cell)?;
                    }
                    Column::Lon => {
                        record.lon = parse_coordinate(row_idx, &schema.lon, &cell)?;
                    }
                    Column::Passthrough(_) => record.passthrough.push(cell),
                }
            }
            records.push(record);
        }

        Ok(Self {
            headers,
            layout,
            records,
        })
    }

    /// Header row as it will be written.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [AddressRecord] {
        &mut self.records
    }

    pub fn resolved_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_resolved()).count()
    }

    pub fn pending_count(&self) -> usize {
        self.len() - self.resolved_count()
    }

    /// Records rendered back into cells, in header order.
    pub(crate) fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.records.iter().map(move |record| {
            self.layout
                .iter()
                .map(|column| match column {
                    Column::Address => record.address.clone(),
                    Column::Region => record.region.clone(),
                    Column::Lat => format_coordinate(record.lat),
                    Column::Lon => format_coordinate(record.lon),
                    Column::Passthrough(idx) => {
                        record.passthrough.get(*idx).cloned().unwrap_or_default()
                    }
                })
                .collect()
        })
    }
}

fn parse_coordinate(
    row_idx: usize,
    column: &str,
    cell: &str,
) -> Result<Option<f64>, CheckpointError> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        // pandas writes missing floats as NaN in some exports
        Ok(value) if value.is_nan() => Ok(None),
        _ => Err(CheckpointError::InvalidCoordinate {
            row: row_idx + 1,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

/// Shortest representation that parses back to the same value.
fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| format!("{:?}", v)).unwrap_or_default()
}
