//! The documentation engine handle shared between the test lifecycle and the
//! client filter.
//!
//! A [`DocContext`] owns the currently-effective documentation options. The
//! test creates one, installs its [`configurer`](DocContext::configurer) on
//! the client, and may keep mutating options between requests; every request
//! that passes the filter gets an immutable [`ConfigurationSnapshot`] of the
//! options as they were at that moment.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::configurer::DocConfigurer;
use crate::snippet::{Snippet, TemplateFormat, default_snippets};

mod preprocessor;
pub use self::preprocessor::{
    OperationPreprocessor, PrettyPrintJsonPreprocessor, RemoveHeadersPreprocessor,
    pretty_print_json, remove_headers,
};

#[derive(derive_more::Debug)]
struct DocOptions {
    output_dir: PathBuf,
    template_format: TemplateFormat,
    #[debug(skip)]
    default_snippets: Vec<Arc<dyn Snippet>>,
    #[debug(skip)]
    preprocessors: Vec<Arc<dyn OperationPreprocessor>>,
    extras: IndexMap<String, serde_json::Value>,
}

/// Shared handle to the documentation engine's options.
///
/// Cloning is cheap and clones observe the same options. See the
/// [module docs](self) for the lifecycle.
#[derive(Debug, Clone)]
pub struct DocContext {
    inner: Arc<RwLock<DocOptions>>,
}

impl DocContext {
    /// Creates a context writing snippets beneath `output_dir`, with the
    /// canonical default snippets, the Asciidoctor format, and no
    /// preprocessors.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let options = DocOptions {
            output_dir: output_dir.into(),
            template_format: TemplateFormat::default(),
            default_snippets: default_snippets(),
            preprocessors: Vec::new(),
            extras: IndexMap::new(),
        };
        Self {
            inner: Arc::new(RwLock::new(options)),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, DocOptions> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, DocOptions> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the template format, builder style.
    #[must_use]
    pub fn with_template_format(self, format: TemplateFormat) -> Self {
        self.set_template_format(format);
        self
    }

    /// Replaces the default snippet set, builder style.
    #[must_use]
    pub fn with_default_snippets(self, snippets: Vec<Arc<dyn Snippet>>) -> Self {
        self.write().default_snippets = snippets;
        self
    }

    /// Appends an operation preprocessor, builder style.
    #[must_use]
    pub fn with_preprocessor(self, preprocessor: impl OperationPreprocessor + 'static) -> Self {
        self.add_preprocessor(preprocessor);
        self
    }

    /// Attaches an unrecognized option, builder style. The value rides along
    /// on every snapshot untouched.
    #[must_use]
    pub fn with_extra(self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.set_extra(key, value);
        self
    }

    /// Attaches an unrecognized option for subsequent snapshots.
    pub fn set_extra(&self, key: impl Into<String>, value: serde_json::Value) {
        self.write().extras.insert(key.into(), value);
    }

    /// Points subsequent snapshots at a different output directory.
    pub fn set_output_dir(&self, output_dir: impl Into<PathBuf>) {
        self.write().output_dir = output_dir.into();
    }

    /// Changes the template format for subsequent snapshots.
    pub fn set_template_format(&self, format: TemplateFormat) {
        self.write().template_format = format;
    }

    /// Appends an operation preprocessor for subsequent snapshots.
    pub fn add_preprocessor(&self, preprocessor: impl OperationPreprocessor + 'static) {
        self.write().preprocessors.push(Arc::new(preprocessor));
    }

    /// The filter that deposits this context's configuration on each request.
    pub fn configurer(&self) -> DocConfigurer {
        DocConfigurer::new(self.clone())
    }

    /// Captures the currently-effective options.
    ///
    /// All fields are read under one lock acquisition, so a snapshot is never
    /// a mix of options from before and after a concurrent mutation.
    pub fn snapshot(&self) -> ConfigurationSnapshot {
        let options = self.read();
        ConfigurationSnapshot {
            output_dir: options.output_dir.clone(),
            template_format: options.template_format,
            default_snippets: options.default_snippets.clone(),
            preprocessors: options.preprocessors.clone(),
            extras: options.extras.clone(),
        }
    }
}

/// An immutable capture of the engine options, deposited per request.
///
/// The recognized options are typed fields; anything else the test attached
/// travels in [`extras`](Self::extras).
#[derive(Clone, derive_more::Debug)]
pub struct ConfigurationSnapshot {
    output_dir: PathBuf,
    template_format: TemplateFormat,
    #[debug(skip)]
    default_snippets: Vec<Arc<dyn Snippet>>,
    #[debug(skip)]
    preprocessors: Vec<Arc<dyn OperationPreprocessor>>,
    extras: IndexMap<String, serde_json::Value>,
}

impl ConfigurationSnapshot {
    /// Where the snippet files are written.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The markup dialect snippets are rendered in.
    pub fn template_format(&self) -> TemplateFormat {
        self.template_format
    }

    /// Snippets rendered for every documented operation.
    pub fn default_snippets(&self) -> &[Arc<dyn Snippet>] {
        &self.default_snippets
    }

    /// Preprocessors applied to the operation before rendering.
    pub fn preprocessors(&self) -> &[Arc<dyn OperationPreprocessor>] {
        &self.preprocessors
    }

    /// Unrecognized options, passed through untouched.
    pub fn extras(&self) -> &IndexMap<String, serde_json::Value> {
        &self.extras
    }
}
