//! Build Service - main application orchestrator.
//!
//! This service coordinates the whole build:
//! 1. Load the variable mapping (optional)
//! 2. Resolve the root model with a [`Processor`]
//! 3. Render the Thing Description
//! 4. Hand the text to its output target

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::{DocumentLoader, Filesystem},
        services::processor::Processor,
    },
    domain::{Variables, print},
    error::TmtdResult,
};

/// Where a rendered description goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Print to the console (`-`).
    Stdout,
    /// Resolve only, write nothing (empty output directory).
    #[default]
    Discard,
    /// Write `<dir>/<name>.td.json`, creating the directory as needed.
    Directory(PathBuf),
}

impl OutputTarget {
    /// Interpret an `--outputDir` value.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Discard,
            "-" => Self::Stdout,
            dir => Self::Directory(PathBuf::from(dir)),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("-"),
            Self::Discard => f.write_str(""),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// File name of the description built from `model`: the first `.tm.` becomes
/// `.td.`.
pub fn description_file_name(model: &str) -> String {
    model.replacen(".tm.", ".td.", 1)
}

/// Result of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Root model file name.
    pub model: String,
    /// The rendered Thing Description.
    pub rendered: String,
    /// File written, if the target was a directory.
    pub written: Option<PathBuf>,
    /// Whether the model used `tm:extends` or `tm:submodel`.
    pub found_directive: bool,
}

impl BuildReport {
    pub fn bytes(&self) -> usize {
        self.rendered.len()
    }
}

/// Main build service.
pub struct BuildService {
    loader: Box<dyn DocumentLoader>,
    filesystem: Box<dyn Filesystem>,
}

impl BuildService {
    /// Create a new build service with the given adapters.
    pub fn new(loader: Box<dyn DocumentLoader>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { loader, filesystem }
    }

    /// Load a variable file through the loader's search path.
    ///
    /// `None` yields an empty mapping.
    pub fn load_variables(&self, varmap: Option<&str>) -> TmtdResult<Variables> {
        let Some(file) = varmap.filter(|f| !f.trim().is_empty()) else {
            return Ok(Variables::new());
        };
        let value = self.loader.load(file)?;
        let variables = Variables::from_value(value)?;
        debug!(file, count = variables.len(), "variables loaded");
        Ok(variables)
    }

    /// Resolve `model` and deliver it to `target`.
    #[instrument(skip(self, variables), fields(target = %target))]
    pub fn build(
        &self,
        model: &str,
        variables: &Variables,
        target: &OutputTarget,
    ) -> TmtdResult<BuildReport> {
        info!("Building {model}");

        let resolution = Processor::new(self.loader.as_ref(), variables).process(model)?;
        if !resolution.found_directive {
            debug!("no tm:extends or tm:submodel link found");
        }

        let rendered = print(&resolution.document.into(), variables);

        let written = match target {
            OutputTarget::Directory(dir) => Some(self.write(dir, model, &rendered)?),
            OutputTarget::Stdout | OutputTarget::Discard => None,
        };

        Ok(BuildReport {
            model: model.to_string(),
            rendered,
            written,
            found_directive: resolution.found_directive,
        })
    }

    fn write(&self, dir: &Path, model: &str, rendered: &str) -> TmtdResult<PathBuf> {
        let path = dir.join(description_file_name(model));
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        if self.filesystem.exists(&path) {
            warn!(path = %path.display(), "overwriting existing description");
        }
        self.filesystem.write_file(&path, rendered)?;
        info!(path = %path.display(), "description written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::MockDocumentLoader;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct RecordingFs {
        files: Arc<Mutex<HashMap<PathBuf, String>>>,
        dirs: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl Filesystem for RecordingFs {
        fn create_dir_all(&self, path: &Path) -> TmtdResult<()> {
            self.dirs.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
        fn write_file(&self, path: &Path, content: &str) -> TmtdResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }
        fn read_to_string(&self, path: &Path) -> TmtdResult<String> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::FilesystemError {
                        path: path.to_path_buf(),
                        reason: "missing".into(),
                    }
                    .into()
                })
        }
        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }

    fn service(docs: Vec<(&'static str, serde_json::Value)>, fs: RecordingFs) -> BuildService {
        let docs: HashMap<&str, serde_json::Value> = docs.into_iter().collect();
        let mut loader = MockDocumentLoader::new();
        loader.expect_load().returning(move |name| {
            docs.get(name).cloned().ok_or_else(|| {
                ApplicationError::NotFound {
                    file: name.to_string(),
                    searched: vec![PathBuf::from(".")],
                }
                .into()
            })
        });
        BuildService::new(Box::new(loader), Box::new(fs))
    }

    #[test]
    fn output_target_parsing() {
        assert_eq!(OutputTarget::parse("-"), OutputTarget::Stdout);
        assert_eq!(OutputTarget::parse(""), OutputTarget::Discard);
        assert_eq!(
            OutputTarget::parse("out"),
            OutputTarget::Directory(PathBuf::from("out"))
        );
    }

    #[test]
    fn description_name_replaces_first_marker_only() {
        assert_eq!(description_file_name("lamp.tm.json"), "lamp.td.json");
        assert_eq!(description_file_name("a.tm.b.tm.json"), "a.td.b.tm.json");
        assert_eq!(description_file_name("plain.json"), "plain.json");
    }

    #[test]
    fn build_writes_description_into_directory() {
        let fs = RecordingFs::default();
        let svc = service(
            vec![("lamp.tm.json", json!({"title": "Lamp", "version": {}}))],
            fs.clone(),
        );
        let report = svc
            .build(
                "lamp.tm.json",
                &Variables::new(),
                &OutputTarget::Directory("out".into()),
            )
            .unwrap();

        let expected = PathBuf::from("out/lamp.td.json");
        assert_eq!(report.written.as_deref(), Some(expected.as_path()));
        assert!(!report.found_directive);
        let files = fs.files.lock().unwrap();
        let text = files.get(&expected).unwrap();
        assert_eq!(text, &report.rendered);
        assert!(text.contains("\"@type\": \"Thing\""));
        assert!(text.contains("\"instance\": \"0.0.0\""));
        assert_eq!(*fs.dirs.lock().unwrap(), vec![PathBuf::from("out")]);
    }

    #[test]
    fn stdout_and_discard_write_nothing() {
        let fs = RecordingFs::default();
        let svc = service(vec![("a.tm.json", json!({"title": "A"}))], fs.clone());
        for target in [OutputTarget::Stdout, OutputTarget::Discard] {
            let report = svc.build("a.tm.json", &Variables::new(), &target).unwrap();
            assert!(report.written.is_none());
            assert!(report.bytes() > 0);
        }
        assert!(fs.files.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_root_model_fails() {
        let svc = service(vec![], RecordingFs::default());
        let err = svc
            .build("gone.tm.json", &Variables::new(), &OutputTarget::Stdout)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn variables_are_loaded_and_substituted() {
        let svc = service(
            vec![
                ("vars.json", json!({"count": 5, "versionInstance": "1.2.3"})),
                (
                    "c.tm.json",
                    json!({"title": "total: {{count}} items", "version": {}, "n": " {{count}} "}),
                ),
            ],
            RecordingFs::default(),
        );
        let vars = svc.load_variables(Some("vars.json")).unwrap();
        let report = svc.build("c.tm.json", &vars, &OutputTarget::Stdout).unwrap();
        assert!(report.rendered.contains("\"title\": \"total: 5 items\""));
        assert!(report.rendered.contains("\"n\": 5"));
        assert!(report.rendered.contains("\"instance\": \"1.2.3\""));
    }

    #[test]
    fn non_object_variable_file_is_rejected() {
        let svc = service(vec![("vars.json", json!([1]))], RecordingFs::default());
        assert!(svc.load_variables(Some("vars.json")).is_err());
        assert!(svc.load_variables(None).unwrap().is_empty());
    }
}
