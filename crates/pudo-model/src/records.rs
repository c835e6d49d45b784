//! Source, target and joined record types.

use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// A vendor row after ingest validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub kyc_id: String,
    pub kyc_status: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub cnpj: Option<String>,
    pub location: Coordinate,
}

impl SourceRecord {
    /// A record with only the identifier and location set.
    pub fn new(kyc_id: impl Into<String>, location: Coordinate) -> Self {
        Self {
            kyc_id: kyc_id.into(),
            kyc_status: None,
            address: None,
            city: None,
            state: None,
            cnpj: None,
            location,
        }
    }
}

/// A PUDO collection point after ingest validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub location: Coordinate,
    /// Average daily orders over the last four weeks.
    pub ado_4w: Option<f64>,
    pub region: Option<String>,
    pub region_id: Option<String>,
    pub gf_lower: Option<f64>,
}

impl TargetRecord {
    pub fn new(location: Coordinate) -> Self {
        Self {
            location,
            ado_4w: None,
            region: None,
            region_id: None,
            gf_lower: None,
        }
    }
}

/// One vendor paired with its nearest PUDO.
///
/// Only built when the distance is within the join threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    /// Great-circle distance in kilometers.
    pub distance_km: f64,
    pub kyc_id: String,
    pub kyc_status: Option<String>,
    pub address: Option<String>,
    /// City with embedded line breaks removed.
    pub city: Option<String>,
    /// State with embedded line breaks removed.
    pub state: Option<String>,
    pub cnpj: Option<String>,
    /// Vendor location.
    pub point: Coordinate,
    pub ado_4w: Option<f64>,
    /// PUDO location.
    pub green: Coordinate,
    pub region: Option<String>,
    pub region_id: Option<String>,
    pub gf_lower: Option<f64>,
}
