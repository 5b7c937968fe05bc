// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cost-proposal document types.
//!
//! Field names follow the external documents byte for byte. Numeric fields
//! arrive as JSON numbers or numeric strings depending on the authoring
//! tool, so both are accepted. Fields this pipeline does not interpret
//! (`proposalDate` and whatever else a document carries) pass through
//! untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One line item of a cost proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub description: String,

    #[serde(with = "flexible_number")]
    pub quantity: f64,

    /// Free-form unit string; only square/cubic units participate in
    /// rescaling.
    pub unit: String,

    #[serde(rename = "totalUnitPrice", with = "flexible_number")]
    pub total_unit_price: f64,

    #[serde(rename = "totalCost", with = "flexible_number")]
    pub total_cost: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A complete cost proposal: ordered line items plus derived totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(rename = "costItems")]
    pub cost_items: Vec<CostItem>,

    #[serde(rename = "totalCostExclVAT", with = "flexible_number")]
    pub total_cost_excl_vat: f64,

    #[serde(rename = "VAT", with = "flexible_number")]
    pub vat: f64,

    #[serde(rename = "totalCost", with = "flexible_number")]
    pub total_cost: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept a JSON number or a numeric string; always serialize as a number.
mod flexible_number {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| D::Error::custom("number out of f64 range")),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("not a number: {s:?}"))),
            other => Err(D::Error::custom(format!(
                "expected number or numeric string, got {other}"
            ))),
        }
    }
}
