//! CSV export of filtered records.

use std::io::Write;

use salonmap_core::BusinessRecord;
use serde::Serialize;

#[derive(Serialize)]
struct CsvRow<'a> {
    osm_type: Option<&'a str>,
    osm_id: Option<i64>,
    name: Option<&'a str>,
    category: Option<&'a str>,
    address: Option<&'a str>,
    city: Option<&'a str>,
    phone: Option<&'a str>,
    website: Option<&'a str>,
    opening_hours: Option<&'a str>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl<'a> From<&'a BusinessRecord> for CsvRow<'a> {
    fn from(r: &'a BusinessRecord) -> Self {
        Self {
            osm_type: r.element_type.as_deref(),
            osm_id: r.element_id,
            name: r.name.as_deref(),
            category: r.category.as_deref(),
            address: r.address.as_deref(),
            city: r.city.as_deref(),
            phone: r.phone.as_deref(),
            website: r.website.as_deref(),
            opening_hours: r.opening_hours.as_deref(),
            lat: r.latitude,
            lon: r.longitude,
        }
    }
}

/// Writes `records` as CSV with a header row. Missing values are empty cells.
///
/// # Errors
///
/// Returns [`csv::Error`] if serialization or the underlying writer fails.
pub fn write_csv<W: Write>(records: &[BusinessRecord], writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    for record in records {
        out.serialize(CsvRow::from(record))?;
    }
    if records.is_empty() {
        // serde-driven headers are only emitted with the first row.
        out.write_record([
            "osm_type",
            "osm_id",
            "name",
            "category",
            "address",
            "city",
            "phone",
            "website",
            "opening_hours",
            "lat",
            "lon",
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Renders `records` to an in-memory CSV string.
///
/// # Errors
///
/// Returns [`csv::Error`] if serialization fails.
pub fn to_csv_string(records: &[BusinessRecord]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    String::from_utf8(buf).map_err(|e| {
        csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
