//! Decoding of upstream reference-data documents.
//!
//! # Industry catalog
//!
//! The canonical response is a paged envelope:
//!
//! ```json
//! { "value": { "value": { "data": [ { "id": "...", "name": "...", "extraProperties": { ... } } ] } } }
//! ```
//!
//! Older deployments return the list under other keys. The accepted shapes
//! are tried in this order:
//!
//! | Shape | Example |
//! |-------|---------|
//! | paged | `{"value":{"value":{"data":[..]}}}` |
//! | value items | `{"value":{"items":[..]}}` |
//! | items | `{"items":[..]}` |
//! | nested list | `{"value":{"value":[..]}}` |
//! | value list | `{"value":[..]}` |
//! | bare list | `[..]` |
//!
//! A JSON document matching none of them yields an empty catalog.
//!
//! # Company tax configuration
//!
//! The record sits at `value.value`, `value`, or the document root, and may
//! itself be a JSON-encoded string. Missing fields take the defaults in
//! [`TaxConfiguration`]; published percentages are normalized to fractions.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::{Map, Value};
use tax_core::{IndustryOption, IndustryRules, SourceError, TaxConfiguration};
use tracing::warn;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IndustryEnvelope {
    Paged { value: PagedValue },
    ValueItems { value: ItemList },
    Items { items: Vec<Value> },
    NestedList { value: ValueList },
    ValueList { value: Vec<Value> },
    Bare(Vec<Value>),
}

impl IndustryEnvelope {
    fn into_items(self) -> Vec<Value> {
        match self {
            Self::Paged { value } => value.value.data,
            Self::ValueItems { value } => value.items,
            Self::Items { items } => items,
            Self::NestedList { value } => value.value,
            Self::ValueList { value } => value,
            Self::Bare(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PagedValue {
    value: DataPage,
}

#[derive(Debug, Deserialize)]
struct DataPage {
    data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ItemList {
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ValueList {
    value: Vec<Value>,
}

/// One catalog entry as published. Every field is optional upstream.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIndustry {
    id: Option<Value>,
    name: Option<Value>,
    label: Option<Value>,
    value: Option<Value>,
    #[serde(rename = "extraProperties")]
    extra_properties: Option<Value>,
}

impl RawIndustry {
    fn into_option(self) -> IndustryOption {
        let id = text(&self.id).or_else(|| text(&self.value)).unwrap_or_default();
        let value = text(&self.value).or_else(|| text(&self.id)).unwrap_or_default();
        let name = text(&self.name)
            .or_else(|| text(&self.label))
            .unwrap_or_else(|| "Unnamed".to_string());

        IndustryOption {
            id,
            name,
            value,
            extra_properties: decode_rules(self.extra_properties),
        }
    }
}

/// Decodes an industry catalog response body.
///
/// # Errors
///
/// Returns [`SourceError::Decode`] only when `body` is not JSON. A JSON
/// document in an unrecognised shape decodes to an empty list, and entries
/// that are not objects are skipped.
pub fn decode_industries(body: &str) -> Result<Vec<IndustryOption>, SourceError> {
    let document: Value =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;

    let items = match IndustryEnvelope::deserialize(document) {
        Ok(envelope) => envelope.into_items(),
        Err(_) => {
            warn!("industry catalog response is not in a known shape, using an empty catalog");
            return Ok(Vec::new());
        }
    };

    let industries = items
        .into_iter()
        .filter_map(|item| match RawIndustry::deserialize(item) {
            Ok(raw) => Some(raw.into_option()),
            Err(error) => {
                warn!(%error, "skipping malformed industry entry");
                None
            }
        })
        .collect();

    Ok(industries)
}

/// Decodes a company income tax configuration response body.
///
/// # Errors
///
/// Returns [`SourceError::Decode`] only when `body` is not JSON.
pub fn decode_configuration(body: &str) -> Result<TaxConfiguration, SourceError> {
    let document: Value =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;

    let record = match locate_configuration(&document) {
        Value::String(encoded) => serde_json::from_str(encoded).unwrap_or_else(|_| {
            warn!("configuration record is an undecodable string, using defaults");
            Value::Object(Map::new())
        }),
        other => other.clone(),
    };

    let rate = field(&record, "TaxRate", "taxRate")
        .and_then(decimal)
        .unwrap_or(TaxConfiguration::DEFAULT_TAX_RATE);
    let threshold = field(&record, "TaxableAmountThreshold", "taxableAmountThreshold")
        .and_then(decimal)
        .unwrap_or(TaxConfiguration::DEFAULT_THRESHOLD);

    let config = TaxConfiguration::from_published(rate, threshold);
    if config.tax_rate < Decimal::ZERO || config.tax_rate > Decimal::ONE {
        warn!(tax_rate = %config.tax_rate, "configured tax rate is outside 0..=1");
    }

    Ok(config)
}

fn locate_configuration(document: &Value) -> &Value {
    let nested = document.get("value").and_then(|v| v.get("value"));
    present(nested)
        .or_else(|| present(document.get("value")))
        .unwrap_or(document)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn field<'a>(
    record: &'a Value,
    name: &str,
    alias: &str,
) -> Option<&'a Value> {
    present(record.get(name)).or_else(|| present(record.get(alias)))
}

fn text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn decimal(value: &Value) -> Option<Decimal> {
    let literal = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };

    Decimal::from_str(&literal)
        .or_else(|_| Decimal::from_scientific(&literal))
        .ok()
}

fn decode_rules(extra: Option<Value>) -> IndustryRules {
    let properties = match extra {
        Some(Value::Object(map)) => map,
        Some(Value::String(encoded)) => match serde_json::from_str(&encoded) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        },
        _ => Map::new(),
    };

    let defaults = IndustryRules::default();
    let flag = |key: &str, default: bool| match properties.get(key) {
        Some(Value::Bool(b)) => *b,
        _ => default,
    };

    IndustryRules {
        requires_income_tax: flag("RequiresIncomeTax", defaults.requires_income_tax),
        has_exemption_period: flag("HasExemptionPeriod", defaults.has_exemption_period),
        exemption_period_years: properties
            .get("ExemptionPeriodYears")
            .and_then(decimal)
            .map_or(defaults.exemption_period_years, whole_years),
    }
}

fn whole_years(years: Decimal) -> u32 {
    if years <= Decimal::ZERO {
        return 0;
    }
    years.trunc().to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn entry() -> Value {
        json!({
            "id": "agric",
            "name": "Agriculture",
            "value": "AGRICULTURE",
            "extraProperties": {
                "RequiresIncomeTax": true,
                "HasExemptionPeriod": true,
                "ExemptionPeriodYears": 5
            }
        })
    }

    fn expected() -> IndustryOption {
        IndustryOption {
            id: "agric".to_string(),
            name: "Agriculture".to_string(),
            value: "AGRICULTURE".to_string(),
            extra_properties: IndustryRules {
                requires_income_tax: true,
                has_exemption_period: true,
                exemption_period_years: 5,
            },
        }
    }

    // =========================================================================
    // industry envelope tests
    // =========================================================================

    #[test]
    fn every_envelope_shape_decodes_the_same_list() {
        let shapes = [
            json!({ "value": { "value": { "data": [entry()] } } }),
            json!({ "value": { "items": [entry()] } }),
            json!({ "items": [entry()] }),
            json!({ "value": { "value": [entry()] } }),
            json!({ "value": [entry()] }),
            json!([entry()]),
        ];

        for shape in shapes {
            let industries = decode_industries(&shape.to_string()).unwrap();
            assert_eq!(industries, vec![expected()], "shape {shape}");
        }
    }

    #[test]
    fn unknown_shape_decodes_to_empty_catalog() {
        let industries = decode_industries(r#"{ "value": { "count": 3 } }"#).unwrap();

        assert!(industries.is_empty());
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let result = decode_industries("<html>502 Bad Gateway</html>");

        assert!(matches!(result, Err(SourceError::Decode(_))));
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let body = json!([entry(), 42, "text"]).to_string();

        let industries = decode_industries(&body).unwrap();

        assert_eq!(industries, vec![expected()]);
    }

    // =========================================================================
    // industry entry tests
    // =========================================================================

    #[test]
    fn missing_fields_fall_back() {
        let body = json!([{ "value": "MINING", "label": "Mining" }]).to_string();

        let industries = decode_industries(&body).unwrap();

        assert_eq!(industries[0].id, "MINING");
        assert_eq!(industries[0].value, "MINING");
        assert_eq!(industries[0].name, "Mining");
        assert_eq!(industries[0].extra_properties, IndustryRules::default());
    }

    #[test]
    fn entry_without_names_is_unnamed() {
        let body = json!([{}]).to_string();

        let industries = decode_industries(&body).unwrap();

        assert_eq!(industries[0].id, "");
        assert_eq!(industries[0].name, "Unnamed");
    }

    #[test]
    fn numeric_ids_become_text() {
        let body = json!([{ "id": 17, "name": "Banking" }]).to_string();

        let industries = decode_industries(&body).unwrap();

        assert_eq!(industries[0].id, "17");
        assert_eq!(industries[0].value, "17");
    }

    #[test]
    fn encoded_extra_properties_are_decoded() {
        let body = json!([{
            "id": "oil",
            "name": "Oil & Gas",
            "extraProperties": "{\"RequiresIncomeTax\":false,\"ExemptionPeriodYears\":\"3\"}"
        }])
        .to_string();

        let rules = decode_industries(&body).unwrap()[0].extra_properties;

        assert!(!rules.requires_income_tax);
        assert!(!rules.has_exemption_period);
        assert_eq!(rules.exemption_period_years, 3);
    }

    #[test]
    fn malformed_extra_properties_use_defaults() {
        let body = json!([
            { "id": "a", "extraProperties": "{not json" },
            { "id": "b", "extraProperties": {
                "RequiresIncomeTax": "no",
                "HasExemptionPeriod": null,
                "ExemptionPeriodYears": "many"
            } },
            { "id": "c", "extraProperties": { "ExemptionPeriodYears": -4 } },
            { "id": "d", "extraProperties": { "ExemptionPeriodYears": 2.7 } }
        ])
        .to_string();

        let industries = decode_industries(&body).unwrap();

        assert_eq!(industries[0].extra_properties, IndustryRules::default());
        assert_eq!(industries[1].extra_properties, IndustryRules::default());
        assert_eq!(industries[2].extra_properties.exemption_period_years, 0);
        assert_eq!(industries[3].extra_properties.exemption_period_years, 2);
    }

    // =========================================================================
    // configuration tests
    // =========================================================================

    #[test]
    fn configuration_in_nested_envelope() {
        let body = json!({
            "value": { "value": { "TaxRate": 0.3, "TaxableAmountThreshold": 25000000 } }
        })
        .to_string();

        let config = decode_configuration(&body).unwrap();

        assert_eq!(config.tax_rate, dec!(0.3));
        assert_eq!(config.taxable_amount_threshold, dec!(25000000));
    }

    #[test]
    fn configuration_percentage_is_normalized() {
        let body = json!({ "value": { "TaxRate": 25 } }).to_string();

        let config = decode_configuration(&body).unwrap();

        assert_eq!(config.tax_rate, dec!(0.25));
        assert_eq!(config.taxable_amount_threshold, dec!(10000000));
    }

    #[test]
    fn configuration_accepts_camel_case_and_encoded_record() {
        let record = json!({ "taxRate": "30", "taxableAmountThreshold": "50000000" }).to_string();
        let body = json!({ "value": { "value": record } }).to_string();

        let config = decode_configuration(&body).unwrap();

        assert_eq!(config.tax_rate, dec!(0.3));
        assert_eq!(config.taxable_amount_threshold, dec!(50000000));
    }

    #[test]
    fn configuration_at_document_root() {
        let config = decode_configuration(r#"{ "TaxRate": 0.2 }"#).unwrap();

        assert_eq!(config.tax_rate, dec!(0.2));
    }

    #[test]
    fn configuration_defaults_when_record_is_unusable() {
        let config = decode_configuration(r#"{ "value": "not json" }"#).unwrap();

        assert_eq!(config, TaxConfiguration::default());
    }

    #[test]
    fn configuration_null_value_falls_through_to_root() {
        let config = decode_configuration(r#"{ "value": null, "TaxRate": 0.3 }"#).unwrap();

        assert_eq!(config.tax_rate, dec!(0.3));
    }

    #[test]
    fn configuration_non_json_is_a_decode_error() {
        let result = decode_configuration("");

        assert!(matches!(result, Err(SourceError::Decode(_))));
    }
}
