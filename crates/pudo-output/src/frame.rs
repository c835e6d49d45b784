//! DataFrame construction from joined records.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use pudo_model::JoinedRecord;
use pudo_model::columns::output;

use crate::error::Result;

/// Build the output table, one row per joined record.
///
/// Columns follow [`output::ALL`]. Distances and coordinates are `Float64`,
/// identifiers and labels are `String`, and absent values are null. An empty
/// slice gives a zero-row frame that still carries every column.
pub fn joined_frame(records: &[JoinedRecord]) -> Result<DataFrame> {
    let floats = |name: &str, value: fn(&JoinedRecord) -> f64| -> Column {
        let values: Vec<f64> = records.iter().map(value).collect();
        Series::new(name.into(), values).into_column()
    };
    let optional_floats = |name: &str, value: fn(&JoinedRecord) -> Option<f64>| -> Column {
        let values: Vec<Option<f64>> = records.iter().map(value).collect();
        Series::new(name.into(), values).into_column()
    };
    let texts = |name: &str, value: fn(&JoinedRecord) -> Option<&str>| -> Column {
        let values: Vec<Option<&str>> = records.iter().map(value).collect();
        Series::new(name.into(), values).into_column()
    };

    let columns = vec![
        floats(output::DISTANCE, |r| r.distance_km),
        texts(output::KYC_ID, |r| Some(r.kyc_id.as_str())),
        texts(output::KYC_STATUS, |r| r.kyc_status.as_deref()),
        texts(output::ADDRESS, |r| r.address.as_deref()),
        texts(output::CITY, |r| r.city.as_deref()),
        texts(output::STATE, |r| r.state.as_deref()),
        texts(output::CNPJ, |r| r.cnpj.as_deref()),
        floats(output::LATITUDE_POINT, |r| r.point.latitude),
        floats(output::LONGITUDE_POINT, |r| r.point.longitude),
        optional_floats(output::ADO_4W, |r| r.ado_4w),
        floats(output::LATITUDE_GREEN, |r| r.green.latitude),
        floats(output::LONGITUDE_GREEN, |r| r.green.longitude),
        texts(output::REGION, |r| r.region.as_deref()),
        texts(output::REGION_ID, |r| r.region_id.as_deref()),
        optional_floats(output::GF_LOWER, |r| r.gf_lower),
    ];

    Ok(DataFrame::new(columns)?)
}
