//! Tests for the playbook workflow

use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use shaper_core::{
    DirectoryManager, Error, LiquidRenderer, Result, TemplateRenderer, render_playbook,
    run_playbook,
};
use shaper_test_utils::FixtureDir;

/// Returns the template file unchanged.
struct Verbatim;

impl TemplateRenderer for Verbatim {
    fn render(&self, template: &Path, _context: &Map<String, Value>) -> Result<String> {
        Ok(std::fs::read_to_string(template).unwrap())
    }
}

#[test]
fn test_render_playbook_merges_and_sorts_leaves() {
    let fixture = FixtureDir::new()
        .with_file("play.yml", "templates:\n  - base.yml\n  - override.yml\n")
        .with_file(
            "base.yml",
            "svc:\n  app.properties:\n    port: '80'\n    host: localhost\nother.properties:\n  k: v\n",
        )
        .with_file("override.yml", "svc:\n  app.properties:\n    port: '8080'\n");

    let flat = render_playbook(&DirectoryManager::default(), &Verbatim, &fixture.path("play.yml"))
        .unwrap();

    // Top-level merge: the later `svc` replaces the earlier one entirely
    let entries: Vec<_> = flat.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    assert_eq!(
        entries,
        vec![
            ("svc/app.properties".to_string(), json!({"port": "8080"})),
            ("other.properties".to_string(), json!({"k": "v"})),
        ]
    );
}

#[test]
fn test_run_playbook_with_liquid() {
    let fixture = FixtureDir::new()
        .with_file(
            "play.yml",
            "variables:\n  env: prod\n  port: 8080\ntemplates:\n  - app.yml.liquid\n",
        )
        .with_file(
            "app.yml.liquid",
            "{{ env }}:\n  app.properties:\n    port: '{{ port }}'\n    env: {{ env }}\n",
        );
    let out = FixtureDir::new();

    let report = run_playbook(
        &DirectoryManager::default(),
        &LiquidRenderer::new().unwrap(),
        &fixture.path("play.yml"),
        Some(out.root()),
    )
    .unwrap();

    assert_eq!(report.written, vec!["prod/app.properties"]);
    out.assert_file_eq("prod/app.properties", "env=prod\nport=8080");
}

#[test]
fn test_run_playbook_defaults_to_playbook_dir() {
    let fixture = FixtureDir::new()
        .with_file("play.yml", "templates: [t.yml]\n")
        .with_file("t.yml", "out:\n  a.properties:\n    b: '2'\n    a: '1'\n");

    run_playbook(&DirectoryManager::default(), &Verbatim, &fixture.path("play.yml"), None).unwrap();
    fixture.assert_file_eq("out/a.properties", "a=1\nb=2");
}

#[test]
fn test_template_must_render_a_mapping() {
    let fixture = FixtureDir::new()
        .with_file("play.yml", "templates: [t.yml]\n")
        .with_file("t.yml", "- just\n- a list\n");

    let err = render_playbook(&DirectoryManager::default(), &Verbatim, &fixture.path("play.yml"))
        .unwrap_err();
    assert!(matches!(err, Error::Template { .. }));
}

#[test]
fn test_invalid_playbook_shape() {
    let fixture = FixtureDir::new().with_file("play.yml", "templates: 42\n");

    let err = render_playbook(&DirectoryManager::default(), &Verbatim, &fixture.path("play.yml"))
        .unwrap_err();
    assert!(matches!(err, Error::Playbook { .. }));
}

#[test]
fn test_liquid_renders_unknown_names_as_empty() {
    let fixture = FixtureDir::new()
        .with_file(
            "play.yml",
            "variables:\n  obj:\n    name: svc\ntemplates:\n  - t.yml.liquid\n",
        )
        .with_file(
            "t.yml.liquid",
            "out:\n  app.properties:\n    a: '{{ missing }}'\n    b: '{{ obj.nope }}'\n    c: '{{ obj.name }}'\n    d: '{{ missing.deeper | default: \"x\" }}'\n    e: '{% if missing %}yes{% else %}no{% endif %}'\n",
        );

    let flat = render_playbook(
        &DirectoryManager::default(),
        &LiquidRenderer::new().unwrap(),
        &fixture.path("play.yml"),
    )
    .unwrap();

    assert_eq!(
        flat.get("out/app.properties"),
        Some(&json!({"a": "", "b": "", "c": "svc", "d": "x", "e": "no"}))
    );
}
