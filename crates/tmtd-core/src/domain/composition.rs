//! Section-level operations on a model document.
//!
//! - applying queued `tm:extends` extensions
//! - advisory `tm:required` checking
//! - folding a resolved submodel into its parent
//! - finalising a root document into a Thing Description

use serde_json::{Map, Value};

use crate::domain::error::{DomainError, kind_of};
use crate::domain::link::Link;
use crate::domain::merge::merge;
use crate::domain::reference::evaluate_in_object;
use crate::domain::substitution::{VERSION_INSTANCE_VARIABLE, Variables};

pub const PROPERTIES: &str = "properties";
pub const ACTIONS: &str = "actions";
pub const EVENTS: &str = "events";
pub const SECURITY: &str = "security";
pub const SECURITY_DEFINITIONS: &str = "securityDefinitions";
pub const LINKS: &str = "links";
pub const REQUIRED: &str = "tm:required";
pub const VERSION: &str = "version";

/// Default `version.instance` when neither the model nor the variables set one.
pub const DEFAULT_VERSION_INSTANCE: &str = "0.0.0";

/// A base model queued by a `tm:extends` link.
#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
    /// Cursor depth at which the link was found.
    pub depth: usize,
    /// The loaded base model.
    pub data: Value,
}

/// Merge the `properties` of every extension into `document.properties`.
///
/// Local declarations always win.
pub fn apply_extensions(
    document: &mut Map<String, Value>,
    extensions: Vec<Extension>,
) -> Vec<DomainError> {
    let mut conflicts = Vec::new();
    for extension in extensions {
        let mut base = match extension.data {
            Value::Object(base) => base,
            other => {
                conflicts.push(DomainError::RootNotObject {
                    found: kind_of(&other),
                });
                continue;
            }
        };
        let Some(inherited) = base.remove(PROPERTIES) else {
            continue;
        };
        let local = document
            .entry(PROPERTIES)
            .or_insert_with(|| Value::Object(Map::new()));
        conflicts.extend(merge(local, inherited, extension.depth));
    }
    conflicts
}

/// Remove `tm:required` and return the entries that do not resolve.
pub fn unresolved_requirements(document: &mut Map<String, Value>) -> Vec<String> {
    let Some(required) = document.shift_remove(REQUIRED) else {
        return Vec::new();
    };
    let entries = match required {
        Value::Array(items) => items,
        other => vec![other],
    };
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(pointer) => {
                let resolved = evaluate_in_object(&*document, &pointer).is_some();
                (!resolved).then_some(pointer)
            }
            other => Some(other.to_string()),
        })
        .collect()
}

/// Fold a resolved child document into its parent.
///
/// Interaction sections are renamed `<instance>.<key>`; security entries are
/// appended; security definitions and links are copied without prefixing.
pub fn fold(
    child: Map<String, Value>,
    instance: &str,
    parent: &mut Map<String, Value>,
) -> Vec<DomainError> {
    let mut problems = Vec::new();
    let prefix = if instance.is_empty() {
        String::new()
    } else {
        format!("{instance}.")
    };

    for (section, value) in child {
        let result = match section.as_str() {
            PROPERTIES | ACTIONS | EVENTS => fold_map(&section, value, &prefix, parent),
            SECURITY_DEFINITIONS => fold_map(&section, value, "", parent),
            SECURITY => fold_list(&section, into_list(value), parent),
            LINKS => match value {
                Value::Array(items) => fold_list(&section, items, parent),
                other => Err(invalid(&section, "a list", &other)),
            },
            _ => Ok(()),
        };
        if let Err(e) = result {
            problems.push(e);
        }
    }
    problems
}

fn fold_map(
    section: &str,
    value: Value,
    prefix: &str,
    parent: &mut Map<String, Value>,
) -> Result<(), DomainError> {
    let Value::Object(entries) = value else {
        return Err(invalid(section, "an object", &value));
    };
    let target = parent
        .entry(section)
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(target) = target else {
        return Err(invalid(section, "an object", target));
    };
    for (key, element) in entries {
        target.insert(format!("{prefix}{key}"), element);
    }
    Ok(())
}

fn fold_list(
    section: &str,
    items: Vec<Value>,
    parent: &mut Map<String, Value>,
) -> Result<(), DomainError> {
    let target = parent
        .entry(section)
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::String(_) = target {
        *target = Value::Array(into_list(target.take()));
    }
    let Value::Array(target) = target else {
        return Err(invalid(section, "a list", target));
    };
    target.extend(items);
    Ok(())
}

/// A single security scheme name or a list of them, as a list.
fn into_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

fn invalid(section: &str, expected: &'static str, found: &Value) -> DomainError {
    DomainError::InvalidSection {
        section: section.to_string(),
        expected,
        found: kind_of(found),
    }
}

/// Turn a resolved root model into a Thing Description.
///
/// Appends the provenance `type` link, marks the document as a `Thing` and
/// resolves `version.instance`.
pub fn finalize(
    document: &mut Map<String, Value>,
    file_name: &str,
    variables: &Variables,
) -> Result<(), DomainError> {
    document.insert("@type".into(), Value::String("Thing".into()));
    resolve_version_instance(document, variables);

    let links = document
        .entry(LINKS)
        .or_insert_with(|| Value::Array(Vec::new()));
    match links {
        Value::Array(items) => {
            items.push(Link::type_link(file_name).to_value());
            Ok(())
        }
        other => Err(invalid(LINKS, "a list", other)),
    }
}

fn resolve_version_instance(document: &mut Map<String, Value>, variables: &Variables) {
    let Some(Value::Object(version)) = document.get_mut(VERSION) else {
        return;
    };
    if version.get("instance").is_some_and(|v| !v.is_null()) {
        return;
    }
    let instance = variables
        .get(VERSION_INSTANCE_VARIABLE)
        .cloned()
        .unwrap_or_else(|| Value::String(DEFAULT_VERSION_INSTANCE.into()));
    version.insert("instance".into(), instance);
}
