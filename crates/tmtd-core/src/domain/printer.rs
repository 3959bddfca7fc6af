//! Ordered, tab-indented JSON output with placeholder substitution.
//!
//! The document root uses a fixed key order that mirrors the layout of a WoT
//! Thing Description; every nested object is printed with sorted keys so the
//! output is stable across runs.

use std::fmt::Write as _;

use serde_json::{Map, Value};

use crate::domain::path::{PathCursor, Segment};
use crate::domain::substitution::{Substituted, Substitution, Variables};

/// Keys printed first at the document root, in this order.
pub const ROOT_KEY_ORDER: [&str; 11] = [
    "@context",
    "title",
    "@type",
    "description",
    "version",
    "securityDefinitions",
    "security",
    "links",
    "properties",
    "actions",
    "events",
];

/// Render a resolved document.
pub fn print(document: &Value, variables: &Variables) -> String {
    let mut printer = Printer {
        out: String::with_capacity(5000),
        variables,
    };
    let mut cursor = PathCursor::new();
    match document {
        Value::Object(root) => printer.root(root, &mut cursor),
        other => printer.value(other, &mut cursor),
    }
    printer.out
}

struct Printer<'a> {
    out: String,
    variables: &'a Variables,
}

impl Printer<'_> {
    fn root(&mut self, root: &Map<String, Value>, cursor: &mut PathCursor) {
        let mut keys: Vec<&str> = ROOT_KEY_ORDER
            .iter()
            .copied()
            .filter(|k| root.contains_key(*k))
            .collect();
        keys.extend(
            root.keys()
                .map(String::as_str)
                .filter(|k| !ROOT_KEY_ORDER.contains(k)),
        );
        // Root-level nulls are dropped.
        keys.retain(|k| !root[*k].is_null());

        self.members(keys.into_iter().map(|k| (k, &root[k])), cursor);
    }

    fn value(&mut self, value: &Value, cursor: &mut PathCursor) {
        match value {
            Value::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                self.members(keys.into_iter().map(|k| (k.as_str(), &map[k])), cursor);
            }
            Value::Array(items) => self.elements(items, cursor),
            Value::String(s) => self.string(s, cursor),
            Value::Number(_) | Value::Bool(_) | Value::Null => self.literal(value),
        }
    }

    fn members<'v>(
        &mut self,
        members: impl ExactSizeIterator<Item = (&'v str, &'v Value)>,
        cursor: &mut PathCursor,
    ) {
        if members.len() == 0 {
            self.out.push_str("{}");
            return;
        }
        let depth = cursor.depth();
        self.out.push('{');
        for (i, (key, element)) in members.enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline(depth + 1);
            self.literal(&Value::String(key.to_string()));
            self.out.push_str(": ");
            cursor.scoped(Segment::Key(key.to_string()), |c| self.value(element, c));
        }
        self.newline(depth);
        self.out.push('}');
    }

    fn elements(&mut self, items: &[Value], cursor: &mut PathCursor) {
        if items.is_empty() {
            self.out.push_str("[]");
            return;
        }
        let depth = cursor.depth();
        self.out.push('[');
        for (i, element) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline(depth + 1);
            cursor.scoped(Segment::Index(i), |c| self.value(element, c));
        }
        self.newline(depth);
        self.out.push(']');
    }

    fn string(&mut self, s: &str, cursor: &PathCursor) {
        let prefix = cursor.prefix();
        match Substitution::new(self.variables, &prefix).apply(s) {
            Substituted::Value(found) => self.literal(&found),
            Substituted::Text(text) => self.literal(&Value::String(text.into_owned())),
        }
    }

    fn literal(&mut self, value: &Value) {
        let _ = write!(self.out, "{value}");
    }

    fn newline(&mut self, indent: usize) {
        self.out.push('\n');
        for _ in 0..indent {
            self.out.push('\t');
        }
    }
}
