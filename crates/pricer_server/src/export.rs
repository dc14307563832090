//! CSV export of the strike scenario table.

use pricer_models::scenarios::ScenarioRow;
use serde::Serialize;

/// Download file name offered to the browser
pub const CSV_FILENAME: &str = "bs_scenarios.csv";

/// One CSV line; field order is the column order.
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    offset: &'a str,
    strike: f64,
    call_price: f64,
    put_price: f64,
    call_delta: f64,
    put_delta: f64,
    gamma: f64,
    vega: f64,
    call_theta: f64,
    put_theta: f64,
    call_rho: f64,
    put_rho: f64,
}

impl<'a> From<&'a ScenarioRow> for CsvRecord<'a> {
    fn from(row: &'a ScenarioRow) -> Self {
        Self {
            offset: &row.offset_label,
            strike: row.strike,
            call_price: row.call_price,
            put_price: row.put_price,
            call_delta: row.greeks.call_delta,
            put_delta: row.greeks.put_delta,
            gamma: row.greeks.gamma,
            vega: row.greeks.vega,
            call_theta: row.greeks.call_theta,
            put_theta: row.greeks.put_theta,
            call_rho: row.greeks.call_rho,
            put_rho: row.greeks.put_rho,
        }
    }
}

/// Write `rows` as CSV with a header line, one line per row in the given order.
pub fn scenarios_csv(rows: &[ScenarioRow]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(CsvRecord::from(row))?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}
