//! Forgiving deserializers for optional CMS fields.
//!
//! Each field is first read into a small self-describing [`Value`] tree and
//! then converted; anything with the wrong shape converts to `None` (or the
//! field default) instead of failing the whole record.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use crate::image::{Crop, Hotspot, RawSource, Text};
use crate::orientation::Orientation;

/// Keys under which a nested asset reference may hide.
const SOURCE_KEYS: &[&str] = &["_ref", "ref", "url", "asset"];

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Map(BTreeMap<String, Value>),
    /// Sequences and anything else we never look inside.
    Other,
}

impl Value {
    fn number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Str(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    fn string(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(m) => m.get(key),
            _ => None,
        }
    }

    fn number_field(&self, key: &str) -> Option<f64> {
        self.field(key).and_then(Value::number)
    }

    fn string_field(&self, key: &str) -> Option<String> {
        self.field(key).and_then(Value::string).map(String::from)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Str(String::from(v)))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_bytes<E: de::Error>(self, _v: &[u8]) -> Result<Value, E> {
        Ok(Value::Other)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Value, D::Error> {
        d.deserialize_any(ValueVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Value::Other)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut out = BTreeMap::new();
        while let Some(key) = map.next_key::<Value>()? {
            let value = map.next_value::<Value>()?;
            if let Value::Str(k) = key {
                out.insert(k, value);
            }
        }
        Ok(Value::Map(out))
    }
}

impl<'de> de::Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(ValueVisitor)
    }
}

fn read<'de, D: Deserializer<'de>>(d: D) -> Result<Value, D::Error> {
    de::Deserialize::deserialize(d)
}

pub(crate) fn orientation<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<Orientation>, D::Error> {
    Ok(read(d)?.string().and_then(Orientation::parse))
}

pub(crate) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match read(d)? {
        Value::Bool(b) => b,
        Value::Number(n) => n == 1.0,
        Value::Str(s) => matches!(s.trim(), "true" | "1" | "yes"),
        _ => false,
    })
}

pub(crate) fn hotspot<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Hotspot>, D::Error> {
    Ok(hotspot_from(&read(d)?))
}

fn hotspot_from(v: &Value) -> Option<Hotspot> {
    let x = v.number_field("x")?;
    let y = v.number_field("y")?;
    Some(Hotspot::new(
        x,
        y,
        v.number_field("width").unwrap_or(0.0),
        v.number_field("height").unwrap_or(0.0),
    ))
}

pub(crate) fn crop<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Crop>, D::Error> {
    let v = read(d)?;
    if !matches!(v, Value::Map(_)) {
        return Ok(None);
    }
    let edge = |k: &str| v.number_field(k).unwrap_or(0.0);
    Ok(Some(Crop::new(edge("top"), edge("right"), edge("bottom"), edge("left"))))
}

pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Text>, D::Error> {
    Ok(match read(d)? {
        Value::Str(s) => Some(Text::Plain(s)),
        v @ Value::Map(_) => {
            let en = v.string_field("en");
            let fr = v.string_field("fr");
            if en.is_none() && fr.is_none() {
                None
            } else {
                Some(Text::Localized { en, fr })
            }
        }
        _ => None,
    })
}

pub(crate) fn raw_source<'de, D: Deserializer<'de>>(d: D) -> Result<Option<RawSource>, D::Error> {
    Ok(source_from(&read(d)?))
}

fn source_from(v: &Value) -> Option<RawSource> {
    match v {
        Value::Str(s) if !s.is_empty() => Some(RawSource::new(s.as_str())),
        Value::Map(_) => SOURCE_KEYS
            .iter()
            .find_map(|k| v.field(k).and_then(source_from)),
        _ => None,
    }
}
