//! Setting records as they are stored, and their decoding rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value type of a setting row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    Number,
    Color,
    Text,
}

/// One tunable setting: `{ "type": ..., "value": ..., "min"?, "max"?, "step"? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingRecord {
    #[serde(rename = "type")]
    pub kind: SettingKind,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl SettingRecord {
    pub fn number(value: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            kind: SettingKind::Number,
            value: Value::from(value),
            min: Some(min),
            max: Some(max),
            step: Some(step),
        }
    }

    pub fn color(hex: &str) -> Self {
        Self {
            kind: SettingKind::Color,
            value: Value::from(hex),
            min: None,
            max: None,
            step: None,
        }
    }

    pub fn text(text: &str) -> Self {
        Self {
            kind: SettingKind::Text,
            value: Value::from(text),
            min: None,
            max: None,
            step: None,
        }
    }

    /// Numeric value clamped to `[min, max]`. Accepts a JSON number or a
    /// string holding one.
    pub fn as_number(&self) -> Option<f64> {
        if self.kind != SettingKind::Number {
            return None;
        }
        let raw = match &self.value {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if !raw.is_finite() {
            return None;
        }
        let lower = self.min.unwrap_or(f64::NEG_INFINITY);
        let upper = self.max.unwrap_or(f64::INFINITY);
        Some(if lower <= upper {
            raw.clamp(lower, upper)
        } else {
            raw
        })
    }

    /// String value of a color or text setting.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        if self.kind != SettingKind::Color {
            return None;
        }
        self.as_str().and_then(Rgb::from_hex)
    }

    /// True if the value can be read as this record's kind.
    pub fn is_usable(&self) -> bool {
        match self.kind {
            SettingKind::Number => self.as_number().is_some(),
            SettingKind::Color => self.as_color().is_some(),
            SettingKind::Text => self.as_str().is_some(),
        }
    }

    /// Unwrap one level of string encoding on a text or color value.
    fn unwrap_encoded_value(mut self) -> Self {
        if self.kind != SettingKind::Number {
            if let Value::String(s) = &self.value {
                if s.starts_with('"') {
                    if let Ok(inner) = serde_json::from_str::<String>(s) {
                        self.value = Value::String(inner);
                    }
                }
            }
        }
        self
    }
}

/// Decode a stored row. The row is either a record object or a string holding
/// one JSON-encoded record; only a single decode step is attempted.
pub fn decode_record(raw: &Value) -> Option<SettingRecord> {
    let record = match raw {
        Value::String(encoded) => serde_json::from_str::<SettingRecord>(encoded).ok()?,
        Value::Object(_) => serde_json::from_value::<SettingRecord>(raw.clone()).ok()?,
        _ => return None,
    };
    Some(record.unwrap_encoded_value())
}

/// 24-bit color parsed from `#RRGGBB` or `#RGB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => Some(Self(
                u8::from_str_radix(&digits[0..2], 16).ok()?,
                u8::from_str_radix(&digits[2..4], 16).ok()?,
                u8::from_str_radix(&digits[4..6], 16).ok()?,
            )),
            3 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|v| v * 17);
                Some(Self(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}
