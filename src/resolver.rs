//! Recursive transclusion resolver.
//!
//! Parses a document, then repeatedly scans it for extend keys, resolves
//! every site found in the pass (recursing into referenced documents),
//! merges the results in, and deletes the resolved keys. The loop ends when a
//! scan finds no extend key.

use crate::error::ResolveError;
use crate::fetch::Fetcher;
use crate::reference::{self, normalize_lexically, Reference};
use crate::tree::merge::{kind_of, merge_at};
use crate::tree::path::Breadcrumbs;
use crate::tree::walker::{delete, find, ExtendSite};
use serde::Serialize;
use std::path::Path;
use toml::{Table, Value};
use tracing::{debug, info, trace};

/// Extend key used when none is configured
pub const DEFAULT_EXTEND_KEY: &str = "__extends";

/// Resolution options
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Name of the directive key that triggers transclusion
    pub extend_key: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extend_key: DEFAULT_EXTEND_KEY.to_string(),
        }
    }
}

/// One transclusion performed during resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransclusionStep {
    /// Nesting depth of the document that requested the transclusion
    pub level: usize,
    /// Document holding the extend key
    pub origin: String,
    /// Resolved reference that was pulled in
    pub reference: String,
    /// Location the referenced content was merged into
    pub target: Breadcrumbs,
}

/// Progress of a single document through the resolution loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Parsed,
    Scanning,
    Resolving,
    Merged,
    Done,
}

/// Resolves documents against a shared fetcher.
///
/// One resolver may be used for many documents; per-document state (origin
/// reference, nesting level) lives on the call stack.
pub struct Resolver<'f> {
    fetcher: &'f Fetcher,
    extend_key: String,
    /// Canonical keys of the references currently being resolved
    active: Vec<String>,
    trace: Option<Vec<TransclusionStep>>,
}

impl<'f> Resolver<'f> {
    pub fn new(fetcher: &'f Fetcher) -> Self {
        Self::with_options(fetcher, ResolveOptions::default())
    }

    pub fn with_options(fetcher: &'f Fetcher, options: ResolveOptions) -> Self {
        Self {
            fetcher,
            extend_key: options.extend_key,
            active: Vec::new(),
            trace: None,
        }
    }

    /// Record every transclusion step; see [`Resolver::take_trace`]
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// Steps recorded so far (empty when tracing is off)
    pub fn take_trace(&mut self) -> Vec<TransclusionStep> {
        self.trace.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Resolve a local file. Relative paths are taken from the current directory.
    pub fn resolve_file(&mut self, path: &Path) -> Result<Table, ResolveError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        self.resolve_reference(&Reference::Path(normalize_lexically(&absolute)))
    }

    /// Fetch and fully resolve the document at `reference`
    pub fn resolve_reference(&mut self, reference: &Reference) -> Result<Table, ResolveError> {
        let document = self.load(reference, 0)?;
        info!(reference = %reference, "Resolved document");
        Ok(document)
    }

    /// Resolve document text. Relative references inside it need `origin`.
    pub fn resolve_str(
        &mut self,
        text: &str,
        origin: Option<&Reference>,
    ) -> Result<Table, ResolveError> {
        let key = origin.map(Reference::canonical_key);
        if let Some(ref key) = key {
            self.active.push(key.clone());
        }
        let result = self.parse(text, origin, 0);
        if key.is_some() {
            self.active.pop();
        }
        result
    }

    fn load(&mut self, reference: &Reference, level: usize) -> Result<Table, ResolveError> {
        let key = reference.canonical_key();
        if let Some(start) = self.active.iter().position(|k| *k == key) {
            let mut chain = self.active[start..].to_vec();
            chain.push(key);
            return Err(ResolveError::Cycle { chain });
        }

        let text = self.fetcher.fetch(reference)?;
        self.active.push(key);
        let result = self.parse(&text, Some(reference), level);
        self.active.pop();
        result
    }

    fn parse(
        &mut self,
        text: &str,
        origin: Option<&Reference>,
        level: usize,
    ) -> Result<Table, ResolveError> {
        let mut document: Table = toml::from_str(text).map_err(|source| ResolveError::Parse {
            reference: describe(origin),
            source,
        })?;
        self.enter(Phase::Parsed, origin, level);

        loop {
            self.enter(Phase::Scanning, origin, level);
            let mut sites: Vec<ExtendSite> = find(&document, &self.extend_key).collect();
            if sites.is_empty() {
                break;
            }
            sites.sort_by(|a, b| a.breadcrumbs.cmp(&b.breadcrumbs));

            self.enter(Phase::Resolving, origin, level);
            for site in sites {
                self.transclude(&mut document, &site.value, &site.breadcrumbs, origin, level)?;
                delete(&mut document, &site.breadcrumbs, &self.extend_key)?;
            }
            self.enter(Phase::Merged, origin, level);
        }

        self.enter(Phase::Done, origin, level);
        Ok(document)
    }

    /// Apply one extend value at `target`.
    ///
    /// Lists are applied last-to-first so the first listed reference has the
    /// highest precedence. Tables address sub-locations by key.
    fn transclude(
        &mut self,
        document: &mut Table,
        value: &Value,
        target: &Breadcrumbs,
        origin: Option<&Reference>,
        level: usize,
    ) -> Result<(), ResolveError> {
        match value {
            Value::String(raw) => self.transclude_one(document, raw, target, origin, level),
            Value::Array(items) => {
                for item in items.iter().rev() {
                    self.transclude(document, item, target, origin, level)?;
                }
                Ok(())
            }
            Value::Table(targets) => {
                for (key, item) in targets {
                    self.transclude(document, item, &target.child(key.as_str()), origin, level)?;
                }
                Ok(())
            }
            other => Err(ResolveError::UnsupportedExtend {
                path: target.child(self.extend_key.as_str()).to_string(),
                kind: kind_of(other),
            }),
        }
    }

    fn transclude_one(
        &mut self,
        document: &mut Table,
        raw: &str,
        target: &Breadcrumbs,
        origin: Option<&Reference>,
        level: usize,
    ) -> Result<(), ResolveError> {
        let reference = reference::resolve(raw, origin)?;
        debug!(
            level,
            origin = %describe(origin),
            reference = %reference,
            target = %target,
            "Transcluding"
        );

        if let Some(steps) = self.trace.as_mut() {
            steps.push(TransclusionStep {
                level,
                origin: describe(origin),
                reference: reference.to_string(),
                target: target.clone(),
            });
        }

        let incoming = self.load(&reference, level + 1)?;
        merge_at(document, incoming, target)
    }

    fn enter(&self, phase: Phase, origin: Option<&Reference>, level: usize) {
        trace!(phase = ?phase, level, origin = %describe(origin), "Resolver phase");
    }
}

fn describe(origin: Option<&Reference>) -> String {
    origin
        .map(ToString::to_string)
        .unwrap_or_else(|| "<string>".to_string())
}
