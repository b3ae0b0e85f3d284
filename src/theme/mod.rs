//! Static site → WordPress theme conversion pipeline.
//!
//! Control flow is strictly linear: load `index.html`, extract landmark
//! sections, collect and copy local assets, emit the theme files. A run
//! either completes or fails as one unit; missing landmarks and
//! unresolvable asset references degrade with a warning instead of
//! failing.
//!
//! # Example
//!
//! ```no_run
//! use pressgen::theme::{convert_site, ConvertOptions};
//!
//! let report = convert_site(
//!     "site".as_ref(),
//!     "site/my-theme".as_ref(),
//!     &ConvertOptions::default(),
//! ).unwrap();
//! println!("theme at {}", report.theme_dir.display());
//! ```

pub mod assets;
pub mod emit;
pub mod sections;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use assets::AssetMap;
pub use emit::ThemeMeta;
pub use sections::ThemeSections;

use crate::dom;
use crate::error::{Error, Result};
use crate::util;

/// Options for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Theme name for the style.css header. Defaults to the output
    /// directory name.
    pub theme_name: Option<String>,
    /// Version recorded in the style.css header.
    pub theme_version: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            theme_name: None,
            theme_version: "0.1.0".to_string(),
        }
    }
}

/// Summary of a completed conversion.
#[derive(Debug)]
pub struct ConversionReport {
    pub theme_dir: PathBuf,
    pub assets_copied: usize,
    pub pages_copied: usize,
}

/// Convert the static site in `site_dir` into a WordPress theme at
/// `out_dir`.
///
/// Fatal conditions: `index.html` missing or unreadable, or the output
/// directory cannot be created. The input is verified before anything is
/// written so a missing input leaves no partial output behind. Existing
/// files at the destination are overwritten without merging.
pub fn convert_site(
    site_dir: &Path,
    out_dir: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let index_path = site_dir.join("index.html");
    let bytes = fs::read(&index_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::MissingIndex(site_dir.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let html = util::decode_text(&bytes);
    let document = dom::parse_html(&html);

    let raw_sections = sections::extract(&document);
    let collected = assets::collect(&document, site_dir);

    let assets_dir = out_dir.join("assets");
    fs::create_dir_all(&assets_dir).map_err(|e| Error::OutputDir {
        path: out_dir.to_path_buf(),
        source: e,
    })?;
    let asset_map = assets::copy_into(&collected, &assets_dir)?;

    // Rewriting happens on the serialized sections; the parsed document is
    // no longer needed past this point.
    let theme_sections = raw_sections.rewrite_assets(&asset_map);
    drop(document);

    let meta = ThemeMeta {
        name: options.theme_name.clone().unwrap_or_else(|| {
            out_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Theme".to_string())
        }),
        version: options.theme_version.clone(),
    };

    emit::write_theme(out_dir, &theme_sections, &asset_map, &meta)?;
    let pages_copied = emit::copy_pages(site_dir, out_dir)?;

    tracing::info!(
        theme = %out_dir.display(),
        assets = asset_map.len(),
        pages = pages_copied,
        "theme generated"
    );

    Ok(ConversionReport {
        theme_dir: out_dir.to_path_buf(),
        assets_copied: asset_map.len(),
        pages_copied,
    })
}
