// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rendering a [`ModelDocument`] to JSON.
//!
//! The established downstream workflow expects every numeric value in
//! `data` as a quoted decimal string and strips the quotes in a separate
//! cleanup step, so [`NumberFormat::Quoted`] is the default. Native JSON
//! numbers are available as an opt-in deviation for consumers that parse
//! the file properly.
//!
//! Tokens are formatted from the `f64` widening of each stored `f32`,
//! which reproduces the digit sequences in existing converted files.

use crate::{LayerRecord, ModelDocument};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// How numeric data values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// Quoted decimal strings (the original format).
    #[default]
    Quoted,
    /// Native JSON numbers.
    Native,
}

impl FromStr for NumberFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quoted" | "strings" => Ok(Self::Quoted),
            "native" | "numbers" => Ok(Self::Native),
            other => Err(format!(
                "unknown number format '{other}'; expected 'quoted' or 'native'"
            )),
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quoted => "quoted",
            Self::Native => "native",
        })
    }
}

/// Builds the JSON value for a document, field order matching the
/// original converter's output.
pub fn to_value(doc: &ModelDocument, numbers: NumberFormat) -> Value {
    json!({
        "activation": doc.activation,
        "output_channels": doc.output_channels,
        "input_channels": doc.input_channels,
        "residual_channels": doc.residual_channels,
        "filter_width": doc.filter_width,
        "dilations": doc.dilations,
        "variables": doc.variables.iter().map(|r| record_value(r, numbers)).collect::<Vec<_>>(),
    })
}

/// Serialises a document to a JSON string, compact or pretty.
pub fn to_json_string(
    doc: &ModelDocument,
    numbers: NumberFormat,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    let value = to_value(doc, numbers);
    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
}

fn record_value(record: &LayerRecord, numbers: NumberFormat) -> Value {
    json!({
        "layer_idx": record.layer_idx,
        "data": record.data.iter().map(|&v| token(v, numbers)).collect::<Vec<_>>(),
        "name": record.name.as_str(),
    })
}

fn token(v: f32, numbers: NumberFormat) -> Value {
    let repr = format!("{}", f64::from(v));
    match numbers {
        NumberFormat::Quoted => Value::String(repr),
        NumberFormat::Native => {
            // JSON has no representation for non-finite values; fall back
            // to the quoted token rather than emitting null.
            match serde_json::Number::from_str(&repr) {
                Ok(n) => Value::Number(n),
                Err(_) => Value::String(repr),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordName;

    fn sample_doc() -> ModelDocument {
        ModelDocument {
            activation: "gated".to_string(),
            output_channels: 1,
            input_channels: 1,
            residual_channels: 2,
            filter_width: 3,
            dilations: vec![1, 2],
            variables: vec![LayerRecord {
                layer_idx: -1,
                data: vec![0.5, -1.25],
                name: RecordName::W,
            }],
        }
    }

    #[test]
    fn test_number_format_parse() {
        assert_eq!("quoted".parse::<NumberFormat>().unwrap(), NumberFormat::Quoted);
        assert_eq!("Native".parse::<NumberFormat>().unwrap(), NumberFormat::Native);
        assert!("decimal".parse::<NumberFormat>().is_err());
    }

    #[test]
    fn test_quoted_tokens() {
        let value = to_value(&sample_doc(), NumberFormat::Quoted);
        let data = &value["variables"][0]["data"];
        assert_eq!(data[0], Value::String("0.5".to_string()));
        assert_eq!(data[1], Value::String("-1.25".to_string()));
    }

    #[test]
    fn test_native_tokens() {
        let value = to_value(&sample_doc(), NumberFormat::Native);
        let data = &value["variables"][0]["data"];
        assert!(data[0].is_number());
        assert_eq!(data[0].as_f64().unwrap(), 0.5);
    }

    #[test]
    fn test_f64_widening_repr() {
        // 0.1f32 widens to the f64 the original tolist() produced.
        assert_eq!(
            token(0.1, NumberFormat::Quoted),
            Value::String("0.10000000149011612".to_string())
        );
    }

    #[test]
    fn test_field_order_matches_original() {
        let s = to_json_string(&sample_doc(), NumberFormat::Quoted, false).unwrap();
        let activation = s.find("\"activation\"").unwrap();
        let dilations = s.find("\"dilations\"").unwrap();
        let variables = s.find("\"variables\"").unwrap();
        assert!(activation < dilations && dilations < variables);
    }

    #[test]
    fn test_render_parse_roundtrip() {
        let doc = sample_doc();
        for numbers in [NumberFormat::Quoted, NumberFormat::Native] {
            let s = to_json_string(&doc, numbers, false).unwrap();
            let back = ModelDocument::from_json(&s).unwrap();
            assert_eq!(back, doc);
        }
    }
}
