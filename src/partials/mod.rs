//! Data-driven HTML partial rendering.
//!
//! Each subdirectory of a generator root that contains both `data.json`
//! and `template.html` becomes one rendered partial. The template is
//! rendered once per entry of the JSON `objs` array with that entry's
//! fields bound directly, and the results are concatenated. A top-level
//! `"render": "full"` instead renders the template once with the whole
//! JSON object bound as `data`.
//!
//! Subdirectories missing either file are skipped.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tera::{Context, Tera};

use crate::error::Result;

const TEMPLATE_NAME: &str = "template.html";

/// Render every partial under `root`. Returns a sorted map of
/// subdirectory name → rendered HTML.
pub fn render_partials(root: &Path) -> Result<BTreeMap<String, String>> {
    let mut rendered = BTreeMap::new();

    let mut entries: Vec<_> = fs::read_dir(root)?.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let data_path = dir.join("data.json");
        let template_path = dir.join(TEMPLATE_NAME);
        if !data_path.is_file() || !template_path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let html = render_one(&data_path, &template_path)?;
        rendered.insert(name, html);
    }

    Ok(rendered)
}

/// Write rendered partials as `<name>.html` files into `out_dir`.
pub fn write_partials(rendered: &BTreeMap<String, String>, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;
    for (name, html) in rendered {
        fs::write(out_dir.join(format!("{name}.html")), html)?;
    }
    Ok(())
}

fn render_one(data_path: &Path, template_path: &Path) -> Result<String> {
    let data: serde_json::Value = serde_json::from_str(&fs::read_to_string(data_path)?)?;

    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, &fs::read_to_string(template_path)?)?;

    if data.get("render").and_then(|v| v.as_str()) == Some("full") {
        let mut ctx = Context::new();
        ctx.insert("data", &data);
        return Ok(tera.render(TEMPLATE_NAME, &ctx)?);
    }

    let Some(objs) = data.get("objs").and_then(|v| v.as_array()) else {
        tracing::warn!(
            data = %data_path.display(),
            "data.json has neither an objs array nor render: full; emitting empty partial"
        );
        return Ok(String::new());
    };

    let mut html = String::new();
    for obj in objs {
        if !obj.is_object() {
            tracing::warn!(data = %data_path.display(), "skipping non-object entry in objs");
            continue;
        }
        let ctx = Context::from_value(obj.clone())?;
        html.push_str(&tera.render(TEMPLATE_NAME, &ctx)?);
    }

    Ok(html)
}
