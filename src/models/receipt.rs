use serde::{Deserialize, Serialize};

/// A purchased line item as submitted; `price` stays a raw decimal string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

/// Receipt document accepted by `POST /receipts/process`
///
/// Field values are kept exactly as received. Parsing of the date, time and
/// money strings happens during scoring, where a malformed value only voids
/// the rule that depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<Item>,
    pub total: String,
}
