// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for tmtd.
//!
//! This module contains the pure resolution logic: path tracking, structural
//! merge, reference evaluation, composition of sections and the ordered
//! printer. Loading documents is done through ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Value model**: documents are `serde_json::Value` trees
//! - **Errors are data**: structural problems are returned, callers log them
//!
// Public API - what the world sees
pub mod composition;
pub mod error;
pub mod link;
pub mod merge;
pub mod path;
pub mod printer;
pub mod reference;
pub mod substitution;

// Re-exports for convenience
pub use composition::{
    Extension, apply_extensions, finalize, fold, unresolved_requirements,
};
pub use error::{DomainError, ErrorCategory, kind_of};
pub use link::{Directive, Link};
pub use merge::{merge, merge_object};
pub use path::{PathCursor, PathPattern, Segment};
pub use printer::print;
pub use reference::Reference;
pub use substitution::{Substituted, Substitution, Variables};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // The same resolved value always prints the same bytes.
    #[test]
    fn print_is_idempotent_after_fold() {
        let mut parent = json!({"title": "T", "links": []})
            .as_object()
            .cloned()
            .unwrap();
        let child = json!({"properties": {"b": 2, "a": 1}})
            .as_object()
            .cloned()
            .unwrap();
        fold(child, "m", &mut parent);
        finalize(&mut parent, "t.tm.json", &Variables::new()).unwrap();
        let doc = serde_json::Value::Object(parent);
        let first = print(&doc, &Variables::new());
        let second = print(&doc, &Variables::new());
        assert_eq!(first, second);
        assert!(first.find("\"m.a\"").unwrap() < first.find("\"m.b\"").unwrap());
    }

    #[test]
    fn dest_wins_for_every_shared_scalar() {
        let a = json!({"k1": 1, "k2": "x", "k3": true});
        let b = json!({"k1": 2, "k2": "y", "k3": false, "k4": null});
        let mut merged = a.clone();
        merge(&mut merged, b, 0);
        for k in ["k1", "k2", "k3"] {
            assert_eq!(merged[k], a[k]);
        }
        assert_eq!(merged["k4"], serde_json::Value::Null);
    }
}
