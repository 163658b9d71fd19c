//! Place rows read from CSV. Every column of a row is kept verbatim so that
//! sorting never alters application fields.

use std::io;

use csv::{ReaderBuilder, StringRecord, Writer};

use crate::error::{GeoError, Result};
use crate::point::HasCoordinates;
use crate::sort;

/// One CSV row plus its parsed coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceRow {
    pub record: StringRecord,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl HasCoordinates for PlaceRow {
    fn latitude(&self) -> Option<f64> {
        self.lat
    }

    fn longitude(&self) -> Option<f64> {
        self.lon
    }
}

#[derive(Debug)]
pub struct PlaceTable {
    pub headers: StringRecord,
    pub rows: Vec<PlaceRow>,
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| GeoError::MissingColumn(name.to_string()))
}

// Empty or unparseable cells become None and are reported by the sorter.
fn parse_cell(record: &StringRecord, idx: usize) -> Option<f64> {
    record.get(idx).and_then(|s| s.trim().parse().ok())
}

/// Reads places from CSV with a header line naming `lat_column` and `lon_column`.
pub fn read_places<R: io::Read>(reader: R, lat_column: &str, lon_column: &str) -> Result<PlaceTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let lat_idx = column_index(&headers, lat_column)?;
    let lon_idx = column_index(&headers, lon_column)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let lat = parse_cell(&record, lat_idx);
        let lon = parse_cell(&record, lon_idx);
        rows.push(PlaceRow { record, lat, lon });
    }

    Ok(PlaceTable { headers, rows })
}

/// Sorts `rows` by distance from `(lat, lon)` and writes them with a trailing
/// `distance_km` column. Returns the number of rows written.
pub fn write_sorted<W: io::Write>(
    writer: W,
    headers: &StringRecord,
    rows: &[PlaceRow],
    lat: f64,
    lon: f64,
    radius: f64,
    limit: Option<usize>,
) -> Result<usize> {
    let mut sorted = sort::sorted_with_distances(rows, lat, lon, radius)?;
    if let Some(limit) = limit {
        sorted.truncate(limit);
    }

    let mut wtr = Writer::from_writer(writer);
    let mut header_out = headers.clone();
    header_out.push_field("distance_km");
    wtr.write_record(&header_out)?;

    for (row, d) in &sorted {
        let mut out = row.record.clone();
        out.push_field(&format!("{:.6}", d));
        wtr.write_record(&out)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(sorted.len())
}
