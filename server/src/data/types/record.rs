//! Kinetic measurement records
//!
//! The input shape for loading rows into a local store. The derived
//! `kcatkm_threshold_delta` column is computed here, once, when a record is
//! stored.

use serde::Deserialize;

use super::query::CellValue;

/// One enzyme/substrate/organism/condition measurement
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KineticRecord {
    pub ec: Option<String>,
    pub substrate: Option<String>,
    pub organism: Option<String>,
    pub uniprot: Option<String>,
    pub enzymetype: Option<String>,
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
    pub smiles: Option<String>,
    pub kcat_value: Option<f64>,
    pub kcat_pubmedid: Option<i64>,
    pub kcat_unit: Option<String>,
    pub km_value: Option<f64>,
    pub km_pubmedid: Option<i64>,
    pub km_unit: Option<String>,
    pub kcatkm_value: Option<f64>,
    pub kcatkm_pubmedid: Option<i64>,
    pub kcatkm_unit: Option<String>,
}

impl KineticRecord {
    /// `|kcatkm_value - kcat_value / km_value|`, absent when any input is
    /// missing or km is zero
    pub fn threshold_delta(&self) -> Option<f64> {
        let kcat = self.kcat_value?;
        let km = self.km_value?;
        let kcatkm = self.kcatkm_value?;
        if km == 0.0 {
            return None;
        }
        Some((kcatkm - kcat / km).abs()).filter(|d| d.is_finite())
    }

    /// Values in schema registry order, including the derived delta
    pub fn cells(&self) -> Vec<CellValue> {
        let text = |v: &Option<String>| CellValue::from(v.clone());
        let number = |v: Option<f64>| CellValue::from(v);
        let id = |v: Option<i64>| CellValue::from(v.map(|n| n as f64));

        vec![
            text(&self.ec),
            text(&self.substrate),
            text(&self.organism),
            text(&self.uniprot),
            text(&self.enzymetype),
            number(self.ph),
            number(self.temperature),
            text(&self.smiles),
            number(self.kcat_value),
            id(self.kcat_pubmedid),
            text(&self.kcat_unit),
            number(self.km_value),
            id(self.km_pubmedid),
            text(&self.km_unit),
            number(self.kcatkm_value),
            id(self.kcatkm_pubmedid),
            text(&self.kcatkm_unit),
            number(self.threshold_delta()),
        ]
    }
}
