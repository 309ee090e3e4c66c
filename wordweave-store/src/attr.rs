//! Conversion from `serde_json::Value` to DynamoDB `AttributeValue`s.
//!
//! Mirrors the reference `to_ddb`: numbers quantize to 4 decimal places,
//! `null` is dropped rather than stored, and nested objects/arrays recurse.

use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use rust_decimal::{Decimal, RoundingStrategy};

/// Convert a JSON value into an `AttributeValue`, or `None` for `null` /
/// empty string / empty array — the reference strips exactly these before
/// the put.
pub fn to_attribute_value(value: &serde_json::Value) -> Option<AttributeValue> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(AttributeValue::Bool(*b)),
        serde_json::Value::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some(AttributeValue::S(s.clone()))
            }
        }
        serde_json::Value::Number(n) => Some(AttributeValue::N(quantize(n).to_string())),
        serde_json::Value::Array(items) => {
            if items.is_empty() {
                None
            } else {
                let values: Vec<AttributeValue> = items.iter().filter_map(to_attribute_value).collect();
                Some(AttributeValue::L(values))
            }
        }
        serde_json::Value::Object(map) => {
            let mut fields = std::collections::HashMap::new();
            for (key, val) in map {
                if let Some(attr) = to_attribute_value(val) {
                    fields.insert(key.clone(), attr);
                }
            }
            Some(AttributeValue::M(fields))
        }
    }
}

/// Quantize a JSON number to 4 decimal places, half-up, as the reference's
/// `Decimal(str(value)).quantize(Decimal("0.0001"), ROUND_HALF_UP)` does.
fn quantize(n: &serde_json::Number) -> Decimal {
    let decimal = Decimal::from_str(&n.to_string()).unwrap_or_default();
    decimal.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Build a DynamoDB item (string-keyed attribute map) from a JSON object,
/// stripping null/empty fields per §4.6.
pub fn item_from_json(
    fields: &serde_json::Map<String, serde_json::Value>,
) -> std::collections::HashMap<String, AttributeValue> {
    fields
        .iter()
        .filter_map(|(k, v)| to_attribute_value(v).map(|attr| (k.clone(), attr)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_empty_are_dropped() {
        assert!(to_attribute_value(&json!(null)).is_none());
        assert!(to_attribute_value(&json!("")).is_none());
        assert!(to_attribute_value(&json!([])).is_none());
    }

    #[test]
    fn numbers_quantize_to_four_decimals() {
        let attr = to_attribute_value(&json!(8.0));
        assert_eq!(attr, Some(AttributeValue::N("8.0000".to_string())));
    }

    #[test]
    fn strings_and_bools_pass_through() {
        assert_eq!(
            to_attribute_value(&json!("hola")),
            Some(AttributeValue::S("hola".to_string()))
        );
        assert_eq!(to_attribute_value(&json!(true)), Some(AttributeValue::Bool(true)));
    }

    #[test]
    fn nested_object_recurses_and_drops_nulls() {
        let attr = to_attribute_value(&json!({"a": 1, "b": null, "c": "x"}));
        match attr {
            Some(AttributeValue::M(map)) => {
                assert_eq!(map.len(), 2);
                assert!(map.contains_key("a"));
                assert!(map.contains_key("c"));
            }
            other => panic!("expected a map, got {other:?}"),
        }
    }

    #[test]
    fn item_from_json_strips_top_level_nulls() {
        let obj = json!({"PK": "SRC#en#build", "source_article": null, "target_word": "construir"});
        let item = item_from_json(obj.as_object().unwrap());
        assert_eq!(item.len(), 2);
        assert!(!item.contains_key("source_article"));
    }
}
