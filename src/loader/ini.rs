//! Minimal INI decoder.
//!
//! Follows the shape of PHP's `parse_ini_file($path, true)` with typed
//! scalars:
//! - `[section]` headers open a nested mapping; keys before the first header
//!   live at the top level
//! - `key = value` pairs; `;` and `#` start comment lines, `;` also ends an
//!   unquoted value
//! - `key[] = v` appends to a sequence, `key[name] = v` sets a nested key
//! - `true`/`on`/`yes` and `false`/`off`/`no`/`none` become booleans, `null`
//!   becomes null, numbers become numbers, quoted values stay strings

use crate::config::{Items, Value};
use anyhow::{Context, Result, bail};
use serde_json::Number;

pub fn parse(source: &str) -> Result<Value> {
    let mut root = Items::new();
    let mut section: Option<String> = None;

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                bail!("line {line_no}: unterminated section header");
            };
            let name = name.trim();
            mapping_entry(&mut root, name);
            section = Some(name.to_string());
            continue;
        }

        let Some((key, raw_value)) = line.split_once('=') else {
            bail!("line {line_no}: expected 'key = value'");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("line {line_no}: empty key");
        }

        let target = match section.as_deref() {
            Some(name) => mapping_entry(&mut root, name)
                .with_context(|| format!("line {line_no}: section '{name}' is not a mapping"))?,
            None => &mut root,
        };
        assign(target, key, parse_value(raw_value.trim()));
    }

    Ok(Value::Object(root))
}

/// The mapping stored under `key`, created (or replacing a scalar) if needed.
fn mapping_entry<'a>(items: &'a mut Items, key: &str) -> Option<&'a mut Items> {
    let slot = items
        .entry(key)
        .or_insert_with(|| Value::Object(Items::new()));
    if !slot.is_object() {
        *slot = Value::Object(Items::new());
    }
    slot.as_object_mut()
}

fn assign(target: &mut Items, key: &str, value: Value) {
    let Some((base, rest)) = key.split_once('[') else {
        target.insert(key.to_string(), value);
        return;
    };
    let Some(index) = rest.strip_suffix(']') else {
        target.insert(key.to_string(), value);
        return;
    };

    let base = base.trim();
    let index = index.trim();
    if index.is_empty() {
        let slot = target
            .entry(base)
            .or_insert_with(|| Value::Array(Vec::new()));
        match slot {
            Value::Array(values) => values.push(value),
            other => *other = Value::Array(vec![value]),
        }
    } else if let Some(map) = mapping_entry(target, base) {
        map.insert(index.to_string(), value);
    }
}

fn parse_value(raw: &str) -> Value {
    for quote in ['"', '\''] {
        if let Some(inner) = raw.strip_prefix(quote) {
            let text = match inner.find(quote) {
                Some(end) => &inner[..end],
                None => inner,
            };
            return Value::String(text.to_string());
        }
    }

    let text = match raw.split_once(';') {
        Some((before, _)) => before.trim_end(),
        None => raw,
    };

    match text.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => return Value::Bool(true),
        "false" | "off" | "no" | "none" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Ok(int) = text.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Some(float) = text.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(float);
    }
    Value::String(text.to_string())
}
