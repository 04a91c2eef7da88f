// ============================================================
// Layer 6 — YAML Writer
// ============================================================
// Renders a ConfigDocument as YAML for the external trainer.
//
// Layout:
//   - mappings and sequences holding collections: block style
//   - collections holding only scalars: flow style
//
//       paths:
//         checkpoint_dir: experiments/demo/checkpoints
//       preprocessing:
//         languages: [en_us, de]
//         text_symbols: ['a', 'b', '''']
//
// Scalars:
//   - strings with control characters     → "..." (\uXXXX escapes)
//   - strings under a single-quoted path  → 'x' ('' escapes ')
//   - strings a YAML 1.1 reader would turn
//     into a bool, null, number or date
//     (yes, ~, 1_000, 1:30, 2024-01-01 …) → 'x'
//   - anything else                       → serde_yaml's own rendering
//   - floats always carry a '.' before the exponent (1.0e-05),
//     otherwise YAML 1.1 readers load them as strings
//
// Reference: YAML 1.2 spec §7 (flow scalars), §8 (block collections)

use anyhow::{bail, Result};
use serde_yaml::{Mapping, Number, Value};
use std::fmt::Write;

use crate::infra::config_store::ConfigDocument;

const INDENT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Block,
    Flow,
}

/// Render the whole document, ending with a newline.
pub fn render(doc: &ConfigDocument) -> Result<String> {
    let mut writer = Writer {
        doc,
        out:  String::new(),
        path: Vec::new(),
    };

    if doc.root().is_empty() {
        return Ok("{}\n".to_string());
    }
    writer.block_mapping(doc.root(), 0, false)?;
    Ok(writer.out)
}

struct Writer<'a> {
    doc:  &'a ConfigDocument,
    out:  String,
    /// Keys from the root down to the value being written
    path: Vec<String>,
}

impl Writer<'_> {
    /// Write `map` as `key: value` lines at `indent`.
    /// With `inline_first` the first key continues the current
    /// line (used after a sequence dash).
    fn block_mapping(&mut self, map: &Mapping, indent: usize, inline_first: bool) -> Result<()> {
        for (i, (key, value)) in map.iter().enumerate() {
            if !(inline_first && i == 0) {
                self.pad(indent);
            }
            let key_text = self.key(key)?;
            self.path.push(key_text.clone());
            self.out.push_str(&key_text);
            self.out.push(':');

            match value {
                Value::Mapping(child) if !is_leaf(value) => {
                    self.out.push('\n');
                    self.block_mapping(child, indent + INDENT, false)?;
                }
                Value::Sequence(items) if !is_leaf(value) => {
                    self.out.push('\n');
                    self.block_sequence(items, indent, false)?;
                }
                _ => {
                    self.out.push(' ');
                    let text = self.inline(value, Context::Block)?;
                    self.out.push_str(&text);
                    self.out.push('\n');
                }
            }
            self.path.pop();
        }
        Ok(())
    }

    fn block_sequence(&mut self, items: &[Value], indent: usize, inline_first: bool) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if !(inline_first && i == 0) {
                self.pad(indent);
            }
            self.out.push_str("- ");

            match item {
                Value::Mapping(child) if !is_leaf(item) => {
                    self.block_mapping(child, indent + INDENT, true)?;
                }
                Value::Sequence(nested) if !is_leaf(item) => {
                    self.block_sequence(nested, indent + INDENT, true)?;
                }
                _ => {
                    let text = self.inline(item, Context::Block)?;
                    self.out.push_str(&text);
                    self.out.push('\n');
                }
            }
        }
        Ok(())
    }

    /// A scalar, or a leaf collection in flow style.
    fn inline(&mut self, value: &Value, ctx: Context) -> Result<String> {
        match value {
            Value::Sequence(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(self.inline(item, Context::Flow)?);
                }
                Ok(format!("[{}]", parts.join(", ")))
            }
            Value::Mapping(map) => {
                let mut parts = Vec::with_capacity(map.len());
                for (k, v) in map {
                    let key = self.key(k)?;
                    self.path.push(key.clone());
                    let val = self.inline(v, Context::Flow);
                    self.path.pop();
                    parts.push(format!("{key}: {}", val?));
                }
                Ok(format!("{{{}}}", parts.join(", ")))
            }
            _ => self.scalar(value, ctx),
        }
    }

    fn scalar(&self, value: &Value, ctx: Context) -> Result<String> {
        Ok(match value {
            Value::Null      => "null".to_string(),
            Value::Bool(b)   => b.to_string(),
            Value::Number(n) => number(n),
            Value::String(s) => string(s, ctx, self.doc.is_single_quoted(&self.path))?,
            Value::Tagged(_) => {
                let text = serde_yaml::to_string(value)?;
                let text = text.trim_end_matches('\n');
                if text.contains('\n') {
                    bail!("cannot write multi-line tagged value at '{}'", self.path.join("."));
                }
                text.to_string()
            }
            Value::Sequence(_) | Value::Mapping(_) => {
                bail!("collection where a scalar was expected at '{}'", self.path.join("."))
            }
        })
    }

    fn key(&self, key: &Value) -> Result<String> {
        match key {
            Value::String(s) => string(s, Context::Block, false),
            Value::Sequence(_) | Value::Mapping(_) => {
                bail!("complex mapping keys are not supported (under '{}')", self.path.join("."))
            }
            other => self.scalar(other, Context::Block),
        }
    }

    fn pad(&mut self, indent: usize) {
        let _ = write!(self.out, "{:indent$}", "");
    }
}

/// A collection whose children are all scalars (or which is empty).
fn is_leaf(value: &Value) -> bool {
    let scalar = |v: &Value| !matches!(v, Value::Sequence(_) | Value::Mapping(_));
    match value {
        Value::Sequence(items) => items.iter().all(scalar),
        Value::Mapping(map)    => map.values().all(scalar),
        _ => true,
    }
}

fn string(s: &str, ctx: Context, force_single: bool) -> Result<String> {
    if s.chars().any(char::is_control) {
        return Ok(double_quoted(s));
    }
    if force_single {
        return Ok(single_quoted(s));
    }
    if ctx == Context::Flow && (s.starts_with('?') || s.contains([',', '[', ']', '{', '}', ':'])) {
        return Ok(single_quoted(s));
    }
    if is_yaml11_keyword(s) || looks_typed_in_yaml11(s) {
        return Ok(single_quoted(s));
    }

    let text = serde_yaml::to_string(s)?;
    let text = text.trim_end_matches('\n');
    if text.contains('\n') {
        return Ok(double_quoted(s));
    }
    Ok(text.to_string())
}

fn single_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Double-quoted scalar; every control character is escaped.
fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"'  => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Plain words YAML 1.1 loaders resolve to bool, null, merge or value.
fn is_yaml11_keyword(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "y" | "n" | "yes" | "no" | "on" | "off" | "true" | "false" | "null" | "~" | "<<" | "="
    )
}

/// Plain scalars a YAML 1.1 loader would read as an int, float or
/// timestamp: `1_000`, `0x1f`, `017`, `1:30`, `.5`, `.inf`,
/// `2024-01-01`, `2024-1-1 10:00:00Z`. Errs on the side of quoting.
fn looks_typed_in_yaml11(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    if matches!(body.to_ascii_lowercase().as_str(), ".inf" | ".nan") {
        return true;
    }

    let digits_first = body.starts_with(|c: char| c.is_ascii_digit())
        || body
            .strip_prefix('.')
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()));

    digits_first
        && body
            .chars()
            .all(|c| c.is_ascii_hexdigit() || "_:.+-xXoOtTzZ ".contains(c))
}

fn number(n: &Number) -> String {
    let text = n.to_string();
    if !n.is_f64() {
        return text;
    }
    // .inf / .nan need no fix-up
    match text.split_once(['e', 'E']) {
        Some((mantissa, exp)) => {
            let mantissa = if mantissa.contains('.') {
                mantissa.to_string()
            } else {
                format!("{mantissa}.0")
            };
            let exp = if exp.starts_with(['-', '+']) {
                exp.to_string()
            } else {
                format!("+{exp}")
            };
            format!("{mantissa}e{exp}")
        }
        None => text,
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> ConfigDocument {
        ConfigDocument::from_yaml_str(yaml).unwrap()
    }

    fn roundtrip(d: &ConfigDocument) -> ConfigDocument {
        ConfigDocument::from_yaml_str(&render(d).unwrap()).unwrap()
    }

    #[test]
    fn test_block_and_flow_layout() {
        let d = doc("paths:\n  data_dir: datasets\nlist: [a, b]\nempty: {}\n");
        assert_eq!(
            render(&d).unwrap(),
            "paths: {data_dir: datasets}\nlist: [a, b]\nempty: {}\n"
        );
    }

    #[test]
    fn test_nested_mapping_in_block_style() {
        let d = doc("model:\n  layers:\n    count: 4\n    dims: [1, 2]\n");
        assert_eq!(
            render(&d).unwrap(),
            "model:\n  layers:\n    count: 4\n    dims: [1, 2]\n"
        );
    }

    #[test]
    fn test_sequence_of_mappings() {
        let d = doc("langs:\n  - name: en\n    dicts: [a]\n  - name: de\n    dicts: [b]\n");
        let out = render(&d).unwrap();
        assert_eq!(out, "langs:\n- name: en\n  dicts: [a]\n- name: de\n  dicts: [b]\n");
        assert_eq!(roundtrip(&d).root(), d.root());
    }

    #[test]
    fn test_single_quoted_path() {
        let mut d = doc("pre:\n  syms: [a, \"'\", ':', '-', ',']\n  other: [a]\n");
        d.mark_single_quoted(&["pre", "syms"]);
        let out = render(&d).unwrap();
        assert!(out.contains("syms: ['a', '''', ':', '-', ',']"), "{out}");
        assert!(out.contains("other: [a]"), "{out}");
        assert_eq!(roundtrip(&d).root(), d.root());
    }

    #[test]
    fn test_ambiguous_strings_survive_roundtrip() {
        let d = doc("a: 'yes'\nb: '123'\nc: 'null'\nd: ' padded '\ne: \"tab\\there\"\nf: '#'\ng: ['x,y', '[z]']\n");
        let out = render(&d).unwrap();
        assert!(out.contains("a: 'yes'"), "{out}");
        assert_eq!(roundtrip(&d).root(), d.root());
    }

    #[test]
    fn test_yaml11_typed_lookalikes_are_quoted() {
        let d = doc(concat!(
            "date: '2024-01-01'\n",
            "stamp: '2024-1-1 10:00:00Z'\n",
            "grouped: '1_000'\n",
            "sexagesimal: '1:30'\n",
            "hex: '0x1f'\n",
            "octal: '017'\n",
            "dot: '.5'\n",
            "inf: '-.inf'\n",
            "merge: '<<'\n",
            "word: 1st\n",
            "flow: ['?a', 'b:c']\n",
        ));
        let out = render(&d).unwrap();

        for line in [
            "date: '2024-01-01'",
            "stamp: '2024-1-1 10:00:00Z'",
            "grouped: '1_000'",
            "sexagesimal: '1:30'",
            "hex: '0x1f'",
            "octal: '017'",
            "dot: '.5'",
            "inf: '-.inf'",
            "merge: '<<'",
            "word: 1st",
            "flow: ['?a', 'b:c']",
        ] {
            assert!(out.contains(line), "missing {line:?} in\n{out}");
        }
        assert_eq!(roundtrip(&d).root(), d.root());
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let d = doc("del: \"x\\u007Fy\"\nnel: \"a\\u0085b\"\nquote: \"q\\\"\\tq\"\n");
        let out = render(&d).unwrap();

        assert!(out.contains("del: \"x\\u007Fy\""), "{out}");
        assert!(out.contains("nel: \"a\\u0085b\""), "{out}");
        assert!(out.contains("quote: \"q\\\"\\tq\""), "{out}");
        assert!(out.chars().all(|c| c == '\n' || !c.is_control()), "{out:?}");
        assert_eq!(roundtrip(&d).root(), d.root());
    }

    #[test]
    fn test_scalars() {
        let d = doc("n: null\nt: true\ni: 42\nf: 0.5\ns: plain\n");
        assert_eq!(render(&d).unwrap(), "n: null\nt: true\ni: 42\nf: 0.5\ns: plain\n");
    }

    #[test]
    fn test_float_exponent_keeps_a_dot() {
        let d = doc("lr: 1.0e-10\n");
        let out = render(&d).unwrap();
        let value = out.trim_start_matches("lr: ").trim();
        assert!(value.contains('.'), "{out}");
        assert!(value.contains("e-"), "{out}");
        assert_eq!(roundtrip(&d).root(), d.root());
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(&doc("")).unwrap(), "{}\n");
    }
}
