use regex::{Regex, RegexBuilder};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::schema::{FieldRule, Normalization};
use crate::error::ConfigError;
use crate::fields::normalize::apply_normalization;

const VALUE_GROUP: &str = "value";

/// Field name → value pairs in configuration order.
///
/// A field is present only when its pattern matched and the normalized value
/// is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    fields: Vec<(String, String)>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

pub struct FieldMatcher {
    compiled: Vec<CompiledField>,
}

struct CompiledField {
    name: String,
    regex: Regex,
    normalize: Normalization,
}

/// Builds `(?:cue|cue…)[\s:]*(?P<value>capture)`, case-insensitive.
pub fn compile_rule(rule: &FieldRule) -> Result<Regex, ConfigError> {
    let cues = rule
        .cues
        .iter()
        .map(|cue| regex::escape(cue))
        .collect::<Vec<_>>()
        .join("|");

    let capture = if rule.case_sensitive_value {
        format!("(?-i:{})", rule.capture)
    } else {
        rule.capture.clone()
    };

    let pattern = format!(r"(?:{})[\s:]*(?P<{}>{})", cues, VALUE_GROUP, capture);

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::InvalidPattern {
            name: rule.name.clone(),
            reason: e.to_string(),
        })
}

impl FieldMatcher {
    pub fn new(rules: &[FieldRule]) -> Result<Self, ConfigError> {
        let compiled = rules
            .iter()
            .map(|rule| {
                Ok(CompiledField {
                    name: rule.name.clone(),
                    regex: compile_rule(rule)?,
                    normalize: rule.normalize,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { compiled })
    }

    /// Runs every field pattern against the whole text, independently.
    /// Only the first match of each pattern is used.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let _span = tracing::debug_span!("fields.extract", text_len = text.len()).entered();

        let mut result = ExtractionResult::new();

        for field in &self.compiled {
            let Some(caps) = field.regex.captures(text) else {
                continue;
            };
            let Some(matched) = caps.name(VALUE_GROUP) else {
                continue;
            };

            let value = apply_normalization(matched.as_str(), field.normalize);
            if value.is_empty() {
                tracing::debug!(field = %field.name, "Matched field normalized to empty value");
                continue;
            }

            result.insert(field.name.clone(), value);
        }

        tracing::debug!(
            matched = result.len(),
            configured = self.compiled.len(),
            "Field extraction finished"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;

    fn default_matcher() -> FieldMatcher {
        FieldMatcher::new(&default_config().unwrap().fields).unwrap()
    }

    fn rule(name: &str, cues: &[&str], capture: &str) -> FieldRule {
        FieldRule {
            name: name.to_string(),
            cues: cues.iter().map(|c| c.to_string()).collect(),
            capture: capture.to_string(),
            normalize: Normalization::Trim,
            case_sensitive_value: false,
            required: false,
            validate: None,
        }
    }

    #[test]
    fn test_cedula_eight_digits() {
        let result = default_matcher().extract("Cedula: 12345678\n");
        assert_eq!(result.get("numero_identificacion"), Some("12345678"));
    }

    #[test]
    fn test_no_cues_gives_empty_result() {
        let result = default_matcher().extract("Lorem ipsum dolor sit amet");
        assert!(result.is_empty());
    }

    #[test]
    fn test_field_independence() {
        let text = "nombre: Juan Perez, motivo: dolor de cabeza.";
        let result = default_matcher().extract(text);

        assert_eq!(result.get("nombre"), Some("Juan Perez"));
        assert_eq!(result.get("motivo_consulta"), Some("dolor de cabeza"));
    }

    #[test]
    fn test_nombre_runs_across_newline_into_next_label() {
        let text = "nombre: Juan Perez\nmotivo: dolor de cabeza.";
        let result = default_matcher().extract(text);

        assert_eq!(result.get("nombre"), Some("Juan Perez\nmotivo"));
        assert_eq!(result.get("motivo_consulta"), Some("dolor de cabeza"));
    }

    #[test]
    fn test_first_match_wins() {
        let text = "CC 11111111 ... cedula 22222222";
        let result = default_matcher().extract(text);
        assert_eq!(result.get("numero_identificacion"), Some("11111111"));
    }

    #[test]
    fn test_id_truncated_to_twelve_digits() {
        let result = default_matcher().extract("identificacion: 1234567890123");
        assert_eq!(result.get("numero_identificacion"), Some("123456789012"));
    }

    #[test]
    fn test_short_id_not_matched() {
        let result = default_matcher().extract("cc: 12345");
        assert!(!result.contains("numero_identificacion"));
    }

    #[test]
    fn test_telefono_prefers_longer_cue_when_needed() {
        let result = default_matcher().extract("Telefono: 3001234567");
        assert_eq!(result.get("telefono"), Some("3001234567"));

        let result = default_matcher().extract("Celular 6012345");
        assert_eq!(result.get("telefono"), Some("6012345"));
    }

    #[test]
    fn test_fecha_nacimiento_forms() {
        let result = default_matcher().extract("Fecha de nacimiento: 5/3/1985");
        assert_eq!(result.get("fecha_nacimiento"), Some("5/3/1985"));

        let result = default_matcher().extract("Nacio 15/03/1985 en Cali");
        assert_eq!(result.get("fecha_nacimiento"), Some("15/03/1985"));
    }

    #[test]
    fn test_sexo_alternation_is_leftmost_first() {
        let result = default_matcher().extract("Sexo: F");
        assert_eq!(result.get("sexo"), Some("F"));

        // `[mf]` is tried before the long forms.
        let result = default_matcher().extract("Genero: masculino");
        assert_eq!(result.get("sexo"), Some("m"));
    }

    #[test]
    fn test_nombre_with_accents() {
        let result = default_matcher().extract("Paciente: José Álvarez Ortiz; edad 40");
        assert_eq!(result.get("nombre"), Some("José Álvarez Ortiz"));
    }

    #[test]
    fn test_nombre_is_case_insensitive_by_default() {
        let result = default_matcher().extract("PACIENTE: MARIA GOMEZ, cama 3");
        assert_eq!(result.get("nombre"), Some("MARIA GOMEZ"));
    }

    #[test]
    fn test_case_sensitive_value() {
        let mut name_rule = rule(
            "nombre",
            &["nombre"],
            "[A-Z][a-z]+(?:\\s+[A-Z][a-z]+)*",
        );
        name_rule.case_sensitive_value = true;
        let matcher = FieldMatcher::new(&[name_rule]).unwrap();

        let result = matcher.extract("NOMBRE: Ana Rojas\nmotivo: control.");
        assert_eq!(result.get("nombre"), Some("Ana Rojas"));
    }

    #[test]
    fn test_free_text_stops_at_period() {
        let text = "Motivo de consulta: dolor abdominal agudo. Dx: apendicitis aguda. Plan";
        let result = default_matcher().extract(text);

        assert_eq!(result.get("motivo_consulta"), Some("de consulta: dolor abdominal agudo"));
        assert_eq!(result.get("diagnostico_principal"), Some("apendicitis aguda"));
    }

    #[test]
    fn test_overlapping_matches_allowed() {
        // "consulta por" also feeds motivo; diagnostico text may overlap it.
        let text = "consulta por dx: migrana cronica.";
        let result = default_matcher().extract(text);

        assert_eq!(result.get("motivo_consulta"), Some("dx: migrana cronica"));
        assert_eq!(result.get("diagnostico_principal"), Some("migrana cronica"));
    }

    #[test]
    fn test_whitespace_only_capture_is_omitted() {
        let result = default_matcher().extract("motivo  .");
        assert!(!result.contains("motivo_consulta"));
    }

    #[test]
    fn test_result_preserves_config_order() {
        let text = "dx: gripa. cc 12345678 nombre: Luis Mora, tel 3101234567.";
        let result = default_matcher().extract(text);

        assert_eq!(
            result.field_names(),
            vec![
                "numero_identificacion",
                "nombre",
                "telefono",
                "diagnostico_principal"
            ]
        );
    }

    #[test]
    fn test_cues_are_escaped() {
        let matcher = FieldMatcher::new(&[rule("historia", &["h.c."], "\\d+")]).unwrap();

        assert_eq!(matcher.extract("H.C.: 998877").get("historia"), Some("998877"));
        assert!(matcher.extract("hxcx: 998877").is_empty());
    }

    #[test]
    fn test_invalid_capture_is_rejected() {
        let result = FieldMatcher::new(&[rule("bad", &["bad"], "[unclosed")]);
        match result {
            Err(ConfigError::InvalidPattern { name, .. }) => assert_eq!(name, "bad"),
            _ => panic!("Expected InvalidPattern error"),
        }
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut result = ExtractionResult::new();
        result.insert("a", "1");
        result.insert("b", "2");
        result.insert("a", "3");

        assert_eq!(result.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
    }
}
