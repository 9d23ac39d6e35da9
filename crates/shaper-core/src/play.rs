//! Playbook workflow: render templates into a document and materialize it
//!
//! A playbook names a set of templates and the variables to render them
//! with:
//!
//! ```yaml
//! variables:
//!   env: prod
//!   port: 8080
//! templates:
//!   - base.yml.liquid
//!   - overrides.yml.liquid
//! ```
//!
//! Each template must render to a YAML mapping shaped like a nested tree.
//! The mappings are merged top-level (later templates win), flattened and
//! written out with their leaf keys sorted.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use shaper_fs::{NormalizedPath, io};

use crate::error::{Error, Result};
use crate::lenient::LenientObject;
use crate::manager::{DirectoryManager, MaterializeReport};
use crate::tree::{FlatMap, Tree, backward};

/// Parsed playbook document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Playbook {
    /// Template context.
    pub variables: Map<String, Value>,
    /// Template paths, relative to the playbook's directory.
    pub templates: Vec<PathBuf>,
}

impl Playbook {
    /// Read a playbook through the manager's registry, so any document
    /// format works.
    pub fn load(manager: &DirectoryManager, path: &Path) -> Result<Self> {
        let document = manager.registry().read(path)?;
        if document.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(document).map_err(|e| Error::Playbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Renders one template file with a context.
pub trait TemplateRenderer {
    fn render(&self, template: &Path, context: &Map<String, Value>) -> Result<String>;
}

/// [`TemplateRenderer`] backed by the Liquid engine with its standard
/// filters.
///
/// Names missing from the context, and missing keys of context mappings,
/// render as empty text rather than failing the template.
pub struct LiquidRenderer {
    parser: liquid::Parser,
}

impl std::fmt::Debug for LiquidRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiquidRenderer").finish_non_exhaustive()
    }
}

impl LiquidRenderer {
    pub fn new() -> Result<Self> {
        let parser = liquid::ParserBuilder::with_stdlib()
            .build()
            .map_err(|e| Error::Template {
                path: PathBuf::new(),
                message: e.to_string(),
            })?;
        Ok(Self { parser })
    }
}

impl TemplateRenderer for LiquidRenderer {
    fn render(&self, template: &Path, context: &Map<String, Value>) -> Result<String> {
        let template_error = |message: String| Error::Template {
            path: template.to_path_buf(),
            message,
        };

        let source = io::read_text(&NormalizedPath::new(template))?;
        let parsed = self
            .parser
            .parse(&source)
            .map_err(|e| template_error(e.to_string()))?;

        let globals =
            LenientObject::globals(context).map_err(|e| template_error(e.to_string()))?;

        parsed
            .render(&globals)
            .map_err(|e| template_error(e.to_string()))
    }
}

/// Render every template of the playbook at `playbook_path` and return the
/// flattened, leaf-sorted result.
pub fn render_playbook(
    manager: &DirectoryManager,
    renderer: &dyn TemplateRenderer,
    playbook_path: &Path,
) -> Result<FlatMap> {
    let playbook = Playbook::load(manager, playbook_path)?;
    let base_dir = playbook_path.parent().unwrap_or(Path::new(""));

    let mut merged = Tree::new();
    for template in &playbook.templates {
        let template_path = base_dir.join(template);
        let rendered = renderer.render(&template_path, &playbook.variables)?;

        let document: Value = serde_yaml::from_str(&rendered).map_err(|e| Error::Template {
            path: template_path.clone(),
            message: format!("rendered output is not valid YAML: {e}"),
        })?;
        let Value::Object(mapping) = document else {
            return Err(Error::Template {
                path: template_path,
                message: "rendered output is not a mapping".to_string(),
            });
        };

        tracing::debug!(template = %template_path.display(), keys = mapping.len(), "rendered template");
        for (key, value) in mapping {
            merged.insert(key, value);
        }
    }

    let mut flat = backward(&merged);
    for value in flat.values_mut() {
        if let Value::Object(leaf) = value {
            leaf.sort_keys();
        }
    }
    Ok(flat)
}

/// Render the playbook and write the result to `out_dir`, or next to the
/// playbook when no directory is given.
pub fn run_playbook(
    manager: &DirectoryManager,
    renderer: &dyn TemplateRenderer,
    playbook_path: &Path,
    out_dir: Option<&Path>,
) -> Result<MaterializeReport> {
    let flat = render_playbook(manager, renderer, playbook_path)?;
    let out_dir = match out_dir {
        Some(dir) => dir,
        None => playbook_path.parent().unwrap_or(Path::new(".")),
    };
    // A bare file name has an empty parent
    let out_dir = if out_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        out_dir
    };

    tracing::info!(
        playbook = %playbook_path.display(),
        files = flat.len(),
        out_dir = %out_dir.display(),
        "running playbook"
    );
    manager.materialize(&flat, out_dir)
}
