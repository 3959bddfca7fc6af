//! `{{placeholder}}` substitution.
//!
//! Two modes exist:
//!
//! 1. A string that is exactly one placeholder (ignoring surrounding blanks)
//!    is replaced by the variable's value, keeping its JSON type.
//! 2. Placeholders embedded in longer text are replaced by the value rendered
//!    as text. Unknown placeholders stay as written.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::domain::error::{DomainError, kind_of};

/// Name of the variable bound to the current property namespace.
pub const PREFIX_VARIABLE: &str = "prefix";
/// Variable consulted for `version.instance`.
pub const VERSION_INSTANCE_VARIABLE: &str = "versionInstance";

static WHOLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\{\s*(\w+)\s*\}\}$").expect("static regex"));
static EMBEDDED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("static regex"));

/// Flat, read-only variable mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables(Map<String, Value>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed variable file. Only objects are accepted.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::InvalidSection {
                section: "varmap".into(),
                expected: "an object",
                found: kind_of(&other),
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of substituting one string.
#[derive(Debug, Clone, PartialEq)]
pub enum Substituted<'a> {
    /// The whole string was a known placeholder.
    Value(Cow<'a, Value>),
    /// Text with every known placeholder replaced.
    Text(Cow<'a, str>),
}

/// Variables plus the namespace of the location being rendered.
#[derive(Debug, Clone, Copy)]
pub struct Substitution<'a> {
    variables: &'a Variables,
    prefix: &'a str,
}

impl<'a> Substitution<'a> {
    pub fn new(variables: &'a Variables, prefix: &'a str) -> Self {
        Self { variables, prefix }
    }

    fn lookup(&self, name: &str) -> Option<Cow<'a, Value>> {
        if name == PREFIX_VARIABLE {
            return Some(Cow::Owned(Value::String(self.prefix.to_string())));
        }
        self.variables.get(name).map(Cow::Borrowed)
    }

    pub fn apply<'s>(&self, input: &'s str) -> Substituted<'s>
    where
        'a: 's,
    {
        let trimmed = input.trim_matches([' ', '\t']);
        if let Some(found) = WHOLE
            .captures(trimmed)
            .and_then(|caps| self.lookup(&caps[1]))
        {
            return Substituted::Value(found);
        }

        let replaced = EMBEDDED.replace_all(input, |caps: &Captures<'_>| match self.lookup(&caps[1]) {
            Some(value) => as_text(&value),
            None => caps[0].to_string(),
        });
        Substituted::Text(replaced)
    }
}

/// Render a value for embedding in text: strings raw, everything else as JSON.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars() -> Variables {
        Variables::from_value(json!({"count": 5, "name": "lamp", "on": true})).unwrap()
    }

    #[test]
    fn whole_placeholder_keeps_type() {
        let v = vars();
        let s = Substitution::new(&v, "");
        assert_eq!(
            s.apply("  {{count}}  "),
            Substituted::Value(Cow::Owned(json!(5)))
        );
        assert_eq!(s.apply("{{ on }}"), Substituted::Value(Cow::Owned(json!(true))));
    }

    #[test]
    fn embedded_placeholders_become_text() {
        let v = vars();
        let s = Substitution::new(&v, "");
        assert_eq!(
            s.apply("total: {{count}} items"),
            Substituted::Text(Cow::Owned("total: 5 items".into()))
        );
        assert_eq!(
            s.apply("{{name}}-{{count}}"),
            Substituted::Text(Cow::Owned("lamp-5".into()))
        );
    }

    #[test]
    fn unknown_placeholders_are_left_untouched() {
        let v = vars();
        let s = Substitution::new(&v, "");
        assert_eq!(
            s.apply("{{missing}}"),
            Substituted::Text(Cow::Owned("{{missing}}".into()))
        );
        assert_eq!(
            s.apply("{{name}} and {{missing}}"),
            Substituted::Text(Cow::Owned("lamp and {{missing}}".into()))
        );
    }

    #[test]
    fn plain_strings_pass_through() {
        let v = vars();
        let s = Substitution::new(&v, "");
        assert_eq!(
            s.apply("no placeholders"),
            Substituted::Text(Cow::Borrowed("no placeholders"))
        );
    }

    #[test]
    fn prefix_is_bound_to_namespace() {
        let v = vars();
        let s = Substitution::new(&v, "motor1");
        assert_eq!(
            s.apply("{{prefix}}/speed"),
            Substituted::Text(Cow::Owned("motor1/speed".into()))
        );
    }

    #[test]
    fn variables_must_be_an_object() {
        assert!(Variables::from_value(json!([1])).is_err());
        assert_eq!(Variables::from_value(json!({})).unwrap().len(), 0);
    }
}
