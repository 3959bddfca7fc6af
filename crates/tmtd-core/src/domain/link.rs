//! Entries of a model's `links` list.

use serde::Serialize;
use serde_json::Value;

/// Relation that pulls a base model's properties into this one.
pub const REL_EXTENDS: &str = "tm:extends";
/// Relation that composes a child model under an instance name.
pub const REL_SUBMODEL: &str = "tm:submodel";
/// Relation of the provenance link added to every description.
pub const REL_TYPE: &str = "type";
/// Media type of Thing Models.
pub const TM_MEDIA_TYPE: &str = "application/tm+json";

/// A link object written into a description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Link {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub media_type: String,
}

impl Link {
    /// The provenance link pointing back at the model a description was built
    /// from.
    pub fn type_link(href: impl Into<String>) -> Self {
        Self {
            rel: REL_TYPE.into(),
            href: href.into(),
            media_type: TM_MEDIA_TYPE.into(),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// What the walker should do with one entry of a `links` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `tm:extends`: load `href` and queue its properties as an extension.
    Extends { href: String },
    /// `tm:submodel`: process `href` as a child model named `instance`.
    Submodel { href: String, instance: String },
    /// Anything else is kept in the output.
    PassThrough,
}

impl Directive {
    /// Classify a raw link entry.
    ///
    /// Only the `rel` and `href` fields are inspected, so entries carrying
    /// extra members still classify. Non-object entries pass through.
    pub fn classify(entry: &Value) -> Self {
        let Some(object) = entry.as_object() else {
            return Self::PassThrough;
        };
        let href = || {
            object
                .get("href")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        match object.get("rel").and_then(Value::as_str) {
            Some(REL_EXTENDS) => Self::Extends { href: href() },
            Some(REL_SUBMODEL) => Self::Submodel {
                href: href(),
                instance: object
                    .get("instanceName")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            },
            _ => Self::PassThrough,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_link_serialises_as_provenance_link() {
        let v = Link::type_link("lamp.tm.json").to_value();
        assert_eq!(
            v,
            json!({"rel": "type", "href": "lamp.tm.json", "type": "application/tm+json"})
        );
    }

    #[test]
    fn classify_directives() {
        assert_eq!(
            Directive::classify(&json!({"rel": "tm:extends", "href": "base.tm.json"})),
            Directive::Extends {
                href: "base.tm.json".into()
            }
        );
        assert_eq!(
            Directive::classify(&json!({"rel": "tm:submodel", "href": "m.tm.json"})),
            Directive::Submodel {
                href: "m.tm.json".into(),
                instance: String::new()
            }
        );
        assert_eq!(
            Directive::classify(&json!({"rel": "icon", "href": "x.png"})),
            Directive::PassThrough
        );
        assert_eq!(Directive::classify(&json!("loose")), Directive::PassThrough);
    }
}
