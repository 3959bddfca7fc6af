//! Processor - resolves one Thing Model.
//!
//! A `Processor` is the composition context for a single model file:
//! 1. Load the model through the [`DocumentLoader`] port
//! 2. Walk it, acting on `links` directives and `tm:ref` references
//! 3. Fold the resolved submodels into the document
//! 4. Apply queued `tm:extends` extensions and check `tm:required`
//! 5. Finalise root models into Thing Descriptions
//!
//! Submodels get a child processor that shares the loader and variables. The
//! child returns its resolved document, the parent folds it and drops it.

use std::sync::LazyLock;

use serde_json::{Map, Value};
use tracing::{debug, error, instrument, warn};

use crate::{
    application::ports::DocumentLoader,
    domain::{
        Directive, DomainError, Extension, PathCursor, PathPattern, Reference, Segment,
        Variables, apply_extensions, finalize, fold, kind_of, merge_object,
        unresolved_requirements,
    },
    error::TmtdResult,
};

static LINKS_PATH: LazyLock<PathPattern> =
    LazyLock::new(|| PathPattern::new("links").expect("static pattern"));
static REF_PATH: LazyLock<PathPattern> =
    LazyLock::new(|| PathPattern::new("properties/.*/tm:ref").expect("static pattern"));

/// Outcome of processing one model file.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The file name the model was loaded from.
    pub file_name: String,
    /// The resolved document. For root models this is a Thing Description.
    pub document: Map<String, Value>,
    /// Whether any `tm:extends` or `tm:submodel` link was seen.
    pub found_directive: bool,
}

/// A resolved child waiting to be folded into its parent.
#[derive(Debug)]
struct Submodel {
    instance: String,
    document: Map<String, Value>,
}

/// Composition context for one model.
pub struct Processor<'a> {
    loader: &'a dyn DocumentLoader,
    variables: &'a Variables,
    /// `None` for the root model, the instance name for submodels.
    instance: Option<String>,
    extensions: Vec<Extension>,
    submodels: Vec<Submodel>,
    found_directive: bool,
}

impl<'a> Processor<'a> {
    /// Create a root processor.
    pub fn new(loader: &'a dyn DocumentLoader, variables: &'a Variables) -> Self {
        Self {
            loader,
            variables,
            instance: None,
            extensions: Vec::new(),
            submodels: Vec::new(),
            found_directive: false,
        }
    }

    /// Create the processor for a submodel of this one.
    fn child(&self, instance: String) -> Processor<'a> {
        Processor {
            instance: Some(instance),
            ..Processor::new(self.loader, self.variables)
        }
    }

    pub fn is_root(&self) -> bool {
        self.instance.is_none()
    }

    /// Resolve `file_name`.
    ///
    /// Fails only if the model itself cannot be loaded or is not an object;
    /// problems with referenced, inherited or composed documents are logged
    /// and the affected fragment is left out.
    #[instrument(skip(self), fields(instance = self.instance.as_deref().unwrap_or("")))]
    pub fn process(mut self, file_name: &str) -> TmtdResult<Resolution> {
        debug!("start process");
        let mut document = match self.loader.load(file_name)? {
            Value::Object(map) => map,
            other => {
                return Err(DomainError::RootNotObject {
                    found: kind_of(&other),
                }
                .into());
            }
        };

        let mut cursor = PathCursor::new();
        self.walk_object(&mut document, &mut cursor);

        for submodel in std::mem::take(&mut self.submodels) {
            for problem in fold(submodel.document, &submodel.instance, &mut document) {
                warn!(submodel = %submodel.instance, error = %problem, "section not folded");
            }
        }

        for conflict in apply_extensions(&mut document, std::mem::take(&mut self.extensions)) {
            error!(error = %conflict, "datatype mismatch while extending, skipped");
        }
        for requirement in unresolved_requirements(&mut document) {
            warn!(required = %requirement, "required element not present");
        }

        if self.is_root() {
            if let Err(e) = finalize(&mut document, file_name, self.variables) {
                warn!(error = %e, "unable to add type link");
            }
        }

        debug!(found_directive = self.found_directive, "end process");
        Ok(Resolution {
            file_name: file_name.to_string(),
            document,
            found_directive: self.found_directive,
        })
    }

    fn walk(&mut self, value: &mut Value, cursor: &mut PathCursor) {
        match value {
            Value::Object(map) => self.walk_object(map, cursor),
            Value::Array(items) => {
                for (i, item) in items.iter_mut().enumerate() {
                    cursor.scoped(Segment::Index(i), |c| self.walk(item, c));
                }
            }
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {}
        }
    }

    fn walk_object(&mut self, map: &mut Map<String, Value>, cursor: &mut PathCursor) {
        let keys: Vec<String> = map.keys().cloned().collect();
        for key in keys {
            cursor.scoped(Segment::Key(key.clone()), |c| {
                if c.matches(&LINKS_PATH) {
                    if let Some(links) = map.get_mut(&key) {
                        let processed = self.process_links(links.take(), c);
                        *links = processed;
                    }
                } else if c.matches(&REF_PATH) {
                    if let Some(raw) = map.get(&key).cloned() {
                        self.process_reference(&raw, map, c);
                    }
                    map.shift_remove(&key);
                } else if let Some(element) = map.get_mut(&key) {
                    self.walk(element, c);
                }
            });
        }
    }

    /// Act on the directives of a `links` list and return what stays visible.
    fn process_links(&mut self, links: Value, cursor: &mut PathCursor) -> Value {
        let Value::Array(entries) = links else {
            warn!(path = %cursor, found = kind_of(&links), "links is not a list, kept as is");
            return links;
        };

        let mut kept = Vec::with_capacity(entries.len());
        for (i, mut entry) in entries.into_iter().enumerate() {
            match Directive::classify(&entry) {
                Directive::Extends { href } => {
                    self.found_directive = true;
                    match self.loader.load(&href) {
                        Ok(data) => self.extensions.push(Extension {
                            depth: cursor.depth(),
                            data,
                        }),
                        Err(e) => error!(file = %href, error = %e, "unable to read extension"),
                    }
                }
                Directive::Submodel { href, instance } => {
                    self.found_directive = true;
                    match self.child(instance.clone()).process(&href) {
                        Ok(resolved) => self.submodels.push(Submodel {
                            instance,
                            document: resolved.document,
                        }),
                        Err(e) => {
                            error!(file = %href, error = %e, "error while processing submodel");
                        }
                    }
                }
                Directive::PassThrough => {
                    if !entry.is_object() {
                        warn!(
                            path = %cursor,
                            index = i,
                            found = kind_of(&entry),
                            "link is not an object, kept as is"
                        );
                    }
                    cursor.scoped(Segment::Index(i), |c| self.walk(&mut entry, c));
                    kept.push(entry);
                }
            }
        }
        Value::Array(kept)
    }

    /// Inline the fragment named by a `tm:ref` into the enclosing property.
    fn process_reference(&mut self, raw: &Value, target: &mut Map<String, Value>, cursor: &PathCursor) {
        let Some(raw) = raw.as_str() else {
            warn!(path = %cursor, found = kind_of(raw), "tm:ref is not a string, dropped");
            return;
        };
        let reference = match Reference::parse(raw) {
            Ok(reference) => reference,
            Err(e) => {
                warn!(path = %cursor, error = %e, "unusable reference");
                return;
            }
        };
        let document = match self.loader.load(&reference.file) {
            Ok(document) => document,
            Err(e) => {
                error!(file = %reference.file, error = %e, "unable to read reference file");
                return;
            }
        };
        match reference.evaluate(&document) {
            Ok(fragment) => {
                for conflict in merge_object(target, fragment.clone(), cursor.depth()) {
                    warn!(path = %cursor, error = %conflict, "reference not fully merged");
                }
            }
            Err(e) => warn!(path = %cursor, error = %e, "reference not resolved"),
        }
    }
}
