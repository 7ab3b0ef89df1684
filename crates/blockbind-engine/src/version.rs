//! Version chains: reading every shape of markup a block has ever saved.
//!
//! A block's chain lists its versions newest first. Index 0 is the current
//! version and the only one that ever renders; older entries exist so that
//! markup persisted under an earlier schema still parses. Extraction itself
//! never fails, so version membership is decided by a structural shape test
//! declared per version, not by extraction errors.

use log::{debug, warn};

use crate::extract::extract;
use crate::markup::{Node, Selector, find_first};
use crate::render::{RenderError, Template, render, validate_template};
use crate::schema::{AttributeDefinition, SchemaError, validate_schema};
use crate::value::AttributeRecord;

/// The structural markers distinguishing one version's render shape.
///
/// A fragment is accepted by a version when every `expect` selector matches
/// and no `reject` selector does. The current version of a chain that never
/// shipped a breaking change can use [`Shape::any`], which accepts
/// everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shape {
    expect: Vec<String>,
    reject: Vec<String>,
}

impl Shape {
    /// Accepts any fragment.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn expect(mut self, selector: &str) -> Self {
        self.expect.push(selector.to_string());
        self
    }

    pub fn reject(mut self, selector: &str) -> Self {
        self.reject.push(selector.to_string());
        self
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for sel in self.expect.iter().chain(&self.reject) {
            if Selector::parse(sel).is_none() {
                return Err(SchemaError::BadShapeSelector(sel.clone()));
            }
        }
        Ok(())
    }

    fn matches(&self, markup: &[Node]) -> bool {
        let found = |s: &String| {
            Selector::parse(s).is_some_and(|sel| find_first(markup, &sel).is_some())
        };
        self.expect.iter().all(&found) && !self.reject.iter().any(&found)
    }
}

/// One version of a block: its schema, its render template, and the shape
/// test that recognizes markup it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionEntry {
    pub schema: Vec<AttributeDefinition>,
    pub template: Vec<Template>,
    pub shape: Shape,
}

impl VersionEntry {
    pub fn new(schema: Vec<AttributeDefinition>, template: Vec<Template>, shape: Shape) -> Self {
        Self {
            schema,
            template,
            shape,
        }
    }
}

/// The result of resolving markup against a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub record: AttributeRecord,
    /// Chain index the record was extracted with; 0 is the current version.
    pub version: usize,
    /// True when no version's shape accepted the fragment and the oldest
    /// version's extraction was used best-effort.
    pub degraded: bool,
}

/// An ordered, validated list of versions, newest first. Immutable once
/// built; a block's chain is fixed at registration for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionChain {
    entries: Vec<VersionEntry>,
}

impl VersionChain {
    /// Validates every entry (schema invariants, template bindings, shape
    /// selectors) and builds the chain. This is the registration-time
    /// validation step; nothing past this point can fail structurally.
    pub fn new(entries: Vec<VersionEntry>) -> Result<Self, SchemaError> {
        if entries.is_empty() {
            return Err(SchemaError::EmptyChain);
        }
        for entry in &entries {
            validate_schema(&entry.schema)?;
            validate_template(&entry.template, &entry.schema)?;
            entry.shape.validate()?;
        }
        Ok(Self { entries })
    }

    /// Convenience for the common single-version block.
    pub fn single(schema: Vec<AttributeDefinition>, template: Vec<Template>) -> Result<Self, SchemaError> {
        Self::new(vec![VersionEntry::new(schema, template, Shape::any())])
    }

    pub fn current(&self) -> &VersionEntry {
        &self.entries[0]
    }

    pub fn entries(&self) -> &[VersionEntry] {
        &self.entries
    }

    /// Resolves a fragment against the chain, newest first.
    ///
    /// The first version whose shape accepts the fragment wins. When none
    /// does, the oldest version's extraction is returned flagged `degraded`;
    /// content is never dropped silently. The record keeps the shape of the
    /// version that matched — upgrading it to the current schema is the
    /// caller's explicit step, typically `default_record().merged(&record)`
    /// on the next save.
    pub fn resolve(&self, markup: &[Node]) -> Resolved {
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.shape.matches(markup) {
                if i > 0 {
                    debug!("fragment matched legacy version {i}");
                }
                return Resolved {
                    record: extract(&entry.schema, markup),
                    version: i,
                    degraded: false,
                };
            }
            debug!("version {i} shape rejected fragment");
        }

        let oldest = self.entries.len() - 1;
        warn!("fragment matched no version shape; extracting with oldest version {oldest}");
        Resolved {
            record: extract(&self.entries[oldest].schema, markup),
            version: oldest,
            degraded: true,
        }
    }

    /// A record holding the current version's defaults for every attribute.
    /// The host merges a resolved legacy record over this to fill attributes
    /// newly introduced at version 0.
    pub fn default_record(&self) -> AttributeRecord {
        self.current()
            .schema
            .iter()
            .map(|def| (def.name.clone(), def.default_value()))
            .collect()
    }

    /// Renders with the current version. All new saves go through here.
    pub fn render_current(&self, record: &AttributeRecord) -> Result<Vec<Node>, RenderError> {
        render(&self.current().template, record)
    }
}
