//! Conversion of loaded frames into typed vendor and PUDO records.

use std::path::Path;

use polars::prelude::{AnyValue, Column, DataFrame};
use pudo_model::columns::{source, target};
use pudo_model::{Coordinate, SourceRecord, TargetRecord};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::csv::read_csv_frame;
use crate::error::{IngestError, Result};
use crate::polars_utils::{any_to_f64, any_to_string_non_empty, any_to_string_opt};

const VENDOR_TABLE: &str = "vendors";
const PUDO_TABLE: &str = "pudos";

/// Rows removed during loading, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropCounts {
    /// Vendor rows with a null or empty `kyc_id`.
    pub missing_id: usize,
    /// Rows whose latitude or longitude is missing, unparseable or non-finite.
    pub invalid_coordinate: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.missing_id + self.invalid_coordinate
    }
}

/// Records that passed validation, plus what was dropped.
#[derive(Debug, Clone)]
pub struct LoadedTable<T> {
    pub records: Vec<T>,
    /// Rows in the input frame.
    pub rows_read: usize,
    pub dropped: DropCounts,
}

/// Convert the vendor frame into [`SourceRecord`]s.
///
/// The `kyc_id` check runs before coordinate coercion, so a row missing both
/// is counted under `missing_id`.
///
/// Text fields are kept as read; only null cells become `None`.
///
/// # Errors
///
/// [`IngestError::MissingColumn`] for the first of [`source::REQUIRED`] that
/// is absent.
pub fn load_sources(df: &DataFrame) -> Result<LoadedTable<SourceRecord>> {
    ensure_columns(df, VENDOR_TABLE, &source::REQUIRED)?;
    let ids = df.column(source::KYC_ID)?;
    let latitudes = df.column(source::LATITUDE)?;
    let longitudes = df.column(source::LONGITUDE)?;
    let statuses = optional_column(df, source::KYC_STATUS);
    let addresses = optional_column(df, source::ADDRESS);
    let cities = optional_column(df, source::CITY);
    let states = optional_column(df, source::STATE);
    let cnpjs = optional_column(df, source::CNPJ);

    let mut records = Vec::with_capacity(df.height());
    let mut dropped = DropCounts::default();
    for row in 0..df.height() {
        let Some(kyc_id) = any_to_string_non_empty(ids.get(row)?) else {
            dropped.missing_id += 1;
            continue;
        };
        let Some(location) = coordinate_at(latitudes, longitudes, row)? else {
            dropped.invalid_coordinate += 1;
            continue;
        };
        records.push(SourceRecord {
            kyc_id,
            kyc_status: text_at(statuses, row)?,
            address: text_at(addresses, row)?,
            city: text_at(cities, row)?,
            state: text_at(states, row)?,
            cnpj: text_at(cnpjs, row)?,
            location,
        });
    }

    Ok(finish(VENDOR_TABLE, records, df.height(), dropped))
}

/// Convert the PUDO frame into [`TargetRecord`]s.
///
/// `ado_4w` and `gf_lower` are coerced to numbers; unparseable values
/// become `None` without dropping the row.
///
/// # Errors
///
/// [`IngestError::MissingColumn`] for the first of [`target::REQUIRED`] that
/// is absent.
pub fn load_targets(df: &DataFrame) -> Result<LoadedTable<TargetRecord>> {
    ensure_columns(df, PUDO_TABLE, &target::REQUIRED)?;
    let latitudes = df.column(target::LATITUDE)?;
    let longitudes = df.column(target::LONGITUDE)?;
    let volumes = optional_column(df, target::ADO_4W);
    let regions = optional_column(df, target::REGION);
    let region_ids = optional_column(df, target::REGION_ID);
    let lower_bounds = optional_column(df, target::GF_LOWER);

    let mut records = Vec::with_capacity(df.height());
    let mut dropped = DropCounts::default();
    for row in 0..df.height() {
        let Some(location) = coordinate_at(latitudes, longitudes, row)? else {
            dropped.invalid_coordinate += 1;
            continue;
        };
        records.push(TargetRecord {
            location,
            ado_4w: number_at(volumes, row)?,
            region: text_at(regions, row)?,
            region_id: text_at(region_ids, row)?,
            gf_lower: number_at(lower_bounds, row)?,
        });
    }

    Ok(finish(PUDO_TABLE, records, df.height(), dropped))
}

/// Read the vendor CSV and convert it with [`load_sources`].
pub fn load_sources_csv(path: &Path) -> Result<LoadedTable<SourceRecord>> {
    let df = read_csv_frame(path)?;
    load_sources(&df)
}

/// Read the PUDO CSV and convert it with [`load_targets`].
pub fn load_targets_csv(path: &Path) -> Result<LoadedTable<TargetRecord>> {
    let df = read_csv_frame(path)?;
    load_targets(&df)
}

fn finish<T>(
    table: &'static str,
    records: Vec<T>,
    rows_read: usize,
    dropped: DropCounts,
) -> LoadedTable<T> {
    if dropped.total() > 0 {
        warn!(
            table,
            missing_id = dropped.missing_id,
            invalid_coordinate = dropped.invalid_coordinate,
            "dropped rows that cannot be joined"
        );
    }
    info!(table, rows_read, kept = records.len(), "table loaded");
    LoadedTable {
        records,
        rows_read,
        dropped,
    }
}

fn ensure_columns(df: &DataFrame, table: &'static str, names: &[&str]) -> Result<()> {
    match names.iter().find(|name| df.column(name).is_err()) {
        Some(name) => Err(IngestError::MissingColumn {
            table,
            column: (*name).to_string(),
        }),
        None => Ok(()),
    }
}

fn optional_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a Column> {
    df.column(name).ok()
}

fn cell(column: Option<&Column>, row: usize) -> Result<AnyValue<'_>> {
    match column {
        Some(column) => Ok(column.get(row)?),
        None => Ok(AnyValue::Null),
    }
}

fn text_at(column: Option<&Column>, row: usize) -> Result<Option<String>> {
    Ok(any_to_string_opt(cell(column, row)?))
}

fn number_at(column: Option<&Column>, row: usize) -> Result<Option<f64>> {
    Ok(any_to_f64(cell(column, row)?))
}

fn coordinate_at(latitudes: &Column, longitudes: &Column, row: usize) -> Result<Option<Coordinate>> {
    let latitude = any_to_f64(latitudes.get(row)?);
    let longitude = any_to_f64(longitudes.get(row)?);
    Ok(match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Coordinate::try_new(latitude, longitude),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn missing_required_column_is_an_error() {
        let df = DataFrame::new(vec![
            Series::new("kyc_id".into(), vec!["K1"]).into_column(),
            Series::new("latitude".into(), vec!["1.0"]).into_column(),
        ])
        .unwrap();
        let err = load_sources(&df).unwrap_err();
        match err {
            IngestError::MissingColumn { table, column } => {
                assert_eq!(table, "vendors");
                assert_eq!(column, "longitude");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn first_missing_required_column_is_reported() {
        let df = DataFrame::new(vec![
            Series::new("ado_4w".into(), vec!["1"]).into_column(),
        ])
        .unwrap();
        let err = load_targets(&df).unwrap_err();
        match err {
            IngestError::MissingColumn { table, column } => {
                assert_eq!(table, "pudos");
                assert_eq!(column, "latitude");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn whitespace_id_and_text_are_kept() {
        let df = DataFrame::new(vec![
            Series::new("kyc_id".into(), vec![Some("  "), Some(""), None]).into_column(),
            Series::new("City".into(), vec![Some(" "), Some("X"), Some("Y")]).into_column(),
            Series::new("latitude".into(), vec!["1.0", "2.0", "3.0"]).into_column(),
            Series::new("longitude".into(), vec!["1.0", "2.0", "3.0"]).into_column(),
        ])
        .unwrap();
        let loaded = load_sources(&df).unwrap();
        assert_eq!(loaded.dropped.missing_id, 2);
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].kyc_id, "  ");
        assert_eq!(loaded.records[0].city.as_deref(), Some(" "));
        assert!(loaded.records[0].state.is_none());
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let df = DataFrame::new(vec![
            Series::new("latitude".into(), vec![1.5f64]).into_column(),
            Series::new("longitude".into(), vec![2.5f64]).into_column(),
        ])
        .unwrap();
        let loaded = load_targets(&df).unwrap();
        assert_eq!(loaded.records.len(), 1);
        let pudo = &loaded.records[0];
        assert_eq!(pudo.location, Coordinate::new(1.5, 2.5));
        assert!(pudo.ado_4w.is_none());
        assert!(pudo.region.is_none());
    }
}
