//! Column names of the input and output tables.
//!
//! Input names follow the vendor and PUDO exports as delivered; output names
//! are the ones downstream consumers of the joined table expect.

/// Vendor (source) table.
pub mod source {
    pub const KYC_ID: &str = "kyc_id";
    pub const KYC_STATUS: &str = "kyc_status";
    pub const ADDRESS: &str = "Address";
    pub const CITY: &str = "City";
    pub const STATE: &str = "State";
    pub const CNPJ: &str = "cnpj";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";

    pub const REQUIRED: [&str; 3] = [KYC_ID, LATITUDE, LONGITUDE];
}

/// PUDO (target) table.
pub mod target {
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const ADO_4W: &str = "ado_4w";
    pub const REGION: &str = "Region";
    pub const REGION_ID: &str = "region_id";
    pub const GF_LOWER: &str = "gf_lower";

    pub const REQUIRED: [&str; 2] = [LATITUDE, LONGITUDE];
}

/// Joined output table.
pub mod output {
    pub const DISTANCE: &str = "distancia_mais_proxima";
    pub const KYC_ID: &str = "kyc_id";
    pub const KYC_STATUS: &str = "kyc_status";
    pub const ADDRESS: &str = "Address";
    pub const CITY: &str = "cidade";
    pub const STATE: &str = "estado";
    pub const CNPJ: &str = "cnpj";
    pub const LATITUDE_POINT: &str = "latitude_point";
    pub const LONGITUDE_POINT: &str = "longitude_point";
    pub const ADO_4W: &str = "ado_4w";
    pub const LATITUDE_GREEN: &str = "latitude_green";
    pub const LONGITUDE_GREEN: &str = "longitude_green";
    pub const REGION: &str = "Region";
    pub const REGION_ID: &str = "region_id";
    pub const GF_LOWER: &str = "gf_lower";

    /// Output columns in emission order.
    pub const ALL: [&str; 15] = [
        DISTANCE,
        KYC_ID,
        KYC_STATUS,
        ADDRESS,
        CITY,
        STATE,
        CNPJ,
        LATITUDE_POINT,
        LONGITUDE_POINT,
        ADO_4W,
        LATITUDE_GREEN,
        LONGITUDE_GREEN,
        REGION,
        REGION_ID,
        GF_LOWER,
    ];
}
