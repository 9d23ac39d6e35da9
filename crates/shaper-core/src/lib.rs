//! Core of shaper
//!
//! - **tree**: [`forward`] and [`backward`] convert between a flat
//!   `path -> contents` map and a nested tree keyed by path segments
//! - **manager**: [`DirectoryManager`] collects a directory into a flat map
//!   and materializes flat maps back onto disk
//! - **play**: renders a playbook's templates into a document and writes it
//! - **config**: optional `shaper.toml` run configuration
//!
//! ```text
//!  directory --collect--> FlatMap --forward--> Tree --> document
//!  directory <-materialize- FlatMap <-backward- Tree <-- document
//! ```

pub mod config;
pub mod error;
pub mod filter;
mod lenient;
pub mod manager;
pub mod play;
pub mod tree;

pub use config::{CONFIG_FILE, ShaperConfig};
pub use error::{Error, Result};
pub use filter::filter_keys;
pub use manager::{
    CollectOptions, Collection, DirectoryManager, FailurePolicy, FileFailure, MaterializeReport,
};
pub use play::{LiquidRenderer, Playbook, TemplateRenderer, render_playbook, run_playbook};
pub use tree::{FlatMap, SEPARATOR, Tree, as_tree, backward, forward, into_tree, is_leaf_segment};
