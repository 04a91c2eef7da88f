// ============================================================
// Layer 3 — Linguistic Manifest
// ============================================================
// The manifest tells the pipeline which languages to train on
// and where their pronunciation dictionaries live:
//
//   linguistic_path: data/linguistic
//   languages:
//     - name: en_us
//       dictionaries: [cmudict, extra]
//     - name: de
//       dictionaries: [wiktionary]
//
// Each dictionary identifier resolves to
//   <linguistic_path>/<name>/<identifier>.tsv
//
// YAML happily parses `name: 1` or `- 2024` as numbers, so the
// string fields accept any scalar and keep its textual form.
//
// Reference: serde documentation (custom deserialize_with)

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// The whole linguistic manifest, languages in declaration order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinguisticManifest {
    /// Root directory containing one sub-directory per language
    pub linguistic_path: String,

    #[serde(default)]
    pub languages: Vec<LanguageDescriptor>,
}

/// One language and the dictionaries that make it up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LanguageDescriptor {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,

    #[serde(default, deserialize_with = "scalar_strings")]
    pub dictionaries: Vec<String>,
}

impl LinguisticManifest {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Language names in manifest order
    pub fn language_names(&self) -> Vec<String> {
        self.languages.iter().map(|l| l.name.clone()).collect()
    }
}

fn scalar_to_string<E: serde::de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        // True / False, as the dictionary directories are named
        Value::Bool(b)   => Ok(if b { "True" } else { "False" }.to_string()),
        other => Err(E::custom(format!("expected a scalar, found {other:?}"))),
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    scalar_to_string(Value::deserialize(d)?)
}

fn scalar_strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    // `dictionaries:` with nothing after it is null, treat as empty
    match Value::deserialize(d)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items.into_iter().map(scalar_to_string).collect(),
        other => Err(serde::de::Error::custom(format!(
            "expected a list of dictionary names, found {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_languages_in_order() {
        let yaml = "\
linguistic_path: data/ling
languages:
  - name: en_us
    dictionaries: [cmudict, extra]
  - name: de
    dictionaries:
      - wiktionary
";
        let m = LinguisticManifest::from_yaml_str(yaml).unwrap();
        assert_eq!(m.linguistic_path, "data/ling");
        assert_eq!(m.language_names(), vec!["en_us", "de"]);
        assert_eq!(m.languages[0].dictionaries, vec!["cmudict", "extra"]);
        assert_eq!(m.languages[1].dictionaries, vec!["wiktionary"]);
    }

    #[test]
    fn test_numeric_names_become_strings() {
        let yaml = "linguistic_path: x\nlanguages:\n  - name: 1\n    dictionaries: [2024]\n";
        let m = LinguisticManifest::from_yaml_str(yaml).unwrap();
        assert_eq!(m.languages[0].name, "1");
        assert_eq!(m.languages[0].dictionaries, vec!["2024"]);
    }

    #[test]
    fn test_missing_dictionaries_is_empty() {
        let yaml = "linguistic_path: x\nlanguages:\n  - name: fr\n  - name: it\n    dictionaries:\n";
        let m = LinguisticManifest::from_yaml_str(yaml).unwrap();
        assert!(m.languages[0].dictionaries.is_empty());
        assert!(m.languages[1].dictionaries.is_empty());
    }

    #[test]
    fn test_bool_names_use_capitalised_spelling() {
        let yaml = "linguistic_path: x\nlanguages:\n  - name: yes\n    dictionaries: [false]\n";
        let m = LinguisticManifest::from_yaml_str(yaml).unwrap();
        // serde_yaml reads `yes` as a string, `false` as a bool
        assert_eq!(m.languages[0].name, "yes");
        assert_eq!(m.languages[0].dictionaries, vec!["False"]);

        let yaml = "linguistic_path: x\nlanguages:\n  - name: true\n    dictionaries: []\n";
        let m = LinguisticManifest::from_yaml_str(yaml).unwrap();
        assert_eq!(m.languages[0].name, "True");
    }

    #[test]
    fn test_missing_linguistic_path_is_an_error() {
        assert!(LinguisticManifest::from_yaml_str("languages: []\n").is_err());
    }
}
