//! Asset collection, copying, and reference rewriting.
//!
//! Walks the parsed document for `src`/`href` references, copies the ones
//! that resolve to files under the site directory into the theme's
//! `assets/` tree (preserving relative structure), and rewrites the
//! occurrences in serialized section markup to
//! `<?php echo get_template_directory_uri(); ?>/assets/...`.
//!
//! Remote references (scheme-qualified, protocol-relative, `mailto:`,
//! `tel:`, fragment-only) pass through untouched and nothing is copied
//! for them.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::dom::{Dom, NodeId};
use crate::error::Result;

/// File extensions recognized as theme assets.
pub const ASSET_EXTENSIONS: &[&str] = &[
    "css", "js", "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "woff", "woff2", "ttf", "otf",
];

/// Attributes scanned for asset references.
const REFERENCE_ATTRS: &[&str] = &["src", "href"];

/// PHP expression the rewriter prefixes copied asset paths with.
const TEMPLATE_URI: &str = "<?php echo get_template_directory_uri(); ?>/assets/";

/// A reference that resolved to a local file under the site directory.
#[derive(Debug, Clone)]
pub struct AssetRef {
    /// The reference exactly as written in the markup.
    pub reference: String,
    /// Cleaned site-relative path (forward slashes, no `./` or leading `/`).
    pub rel: String,
    /// Resolved path on disk.
    pub source: PathBuf,
}

/// Mapping from original site-relative asset paths to their location under
/// the theme's `assets/` directory.
///
/// Backed by a `BTreeMap` so iteration order (and therefore emitted
/// `functions.php` content) is deterministic across runs.
#[derive(Debug, Default)]
pub struct AssetMap {
    entries: BTreeMap<String, String>,
}

impl AssetMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by cleaned original path.
    pub fn get(&self, rel: &str) -> Option<&str> {
        self.entries.get(rel).map(|s| s.as_str())
    }

    /// Fallback lookup by file name, used when a reference was written
    /// with a different directory prefix than the copied asset.
    pub fn get_by_basename(&self, rel: &str) -> Option<&str> {
        let basename = rel.rsplit('/').next()?;
        self.entries
            .iter()
            .find(|(k, _)| k.rsplit('/').next() == Some(basename))
            .map(|(_, v)| v.as_str())
    }

    /// Copied paths with the given extension, in sorted order.
    pub fn with_extension<'a>(&'a self, ext: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .values()
            .filter(move |v| Path::new(v).extension().and_then(|e| e.to_str()) == Some(ext))
            .map(|v| v.as_str())
    }
}

/// Check whether a reference points outside the site (and must be left
/// untouched).
pub fn is_remote(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("data:")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with('#')
}

/// Normalize a local reference to a site-relative path.
///
/// Strips `./` prefixes and a leading `/`, drops any query string or
/// fragment, percent-decodes, and normalizes separators. Returns `None`
/// for empty results and for paths that try to escape the site directory.
fn clean_reference(value: &str) -> Option<String> {
    let v = value.trim();
    let v = v.split(['?', '#']).next().unwrap_or(v);

    let decoded = percent_decode_str(v).decode_utf8_lossy().replace('\\', "/");
    let mut s = decoded.as_str();
    while let Some(rest) = s.strip_prefix("./") {
        s = rest;
    }
    let s = s.trim_start_matches('/');

    if s.is_empty() {
        return None;
    }

    // Only references that stay under the site directory are candidates
    if s.split('/').any(|part| part == "..") {
        return None;
    }

    Some(s.to_string())
}

/// File extension of a cleaned reference, lowercased.
fn extension(rel: &str) -> Option<String> {
    Path::new(rel)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Walk the document for local asset references that resolve to files
/// under `site_dir`. Duplicate references are collected once; references
/// that do not resolve are logged and skipped.
pub fn collect(dom: &Dom, site_dir: &Path) -> Vec<AssetRef> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut assets = Vec::new();

    for id in dom.descendants(NodeId::DOCUMENT) {
        for &attr_name in REFERENCE_ATTRS {
            let Some(value) = dom.attr(id, attr_name) else {
                continue;
            };
            if is_remote(value) {
                continue;
            }
            let Some(rel) = clean_reference(value) else {
                continue;
            };
            let Some(ext) = extension(&rel) else {
                continue;
            };
            if !ASSET_EXTENSIONS.contains(&ext.as_str()) {
                continue;
            }
            if seen.contains(&rel) {
                continue;
            }

            let source = site_dir.join(&rel);
            if !source.is_file() {
                tracing::warn!(reference = value, "referenced asset not found on disk");
                continue;
            }

            seen.insert(rel.clone());
            assets.push(AssetRef {
                reference: value.to_string(),
                rel,
                source,
            });
        }
    }

    assets
}

/// Copy collected assets into `assets_dir`, preserving relative structure.
///
/// Returns the mapping used to rewrite references in the extracted
/// sections. Copy failures are fatal (the theme would otherwise reference
/// files that do not exist).
pub fn copy_into(assets: &[AssetRef], assets_dir: &Path) -> Result<AssetMap> {
    let mut map = AssetMap::default();

    for asset in assets {
        let dest = assets_dir.join(&asset.rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&asset.source, &dest)?;
        map.entries.insert(asset.rel.clone(), asset.rel.clone());
    }

    Ok(map)
}

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(src|href)=("|')([^"']+)("|')"#).unwrap());

/// Rewrite `src`/`href` occurrences of copied assets in serialized markup.
///
/// Matching is by exact cleaned path with a basename fallback; anything
/// else (remote URLs, page links, unresolved references) is left as
/// written.
pub fn rewrite_paths(html: &str, map: &AssetMap) -> String {
    if map.is_empty() {
        return html.to_string();
    }

    REFERENCE_RE
        .replace_all(html, |caps: &regex::Captures| {
            let attr = &caps[1];
            let open = &caps[2];
            let value = &caps[3];
            let close = &caps[4];

            if is_remote(value) {
                return caps[0].to_string();
            }
            let Some(rel) = clean_reference(value) else {
                return caps[0].to_string();
            };
            let Some(new) = map.get(&rel).or_else(|| map.get_by_basename(&rel)) else {
                return caps[0].to_string();
            };

            format!("{attr}={open}{TEMPLATE_URI}{new}{close}")
        })
        .into_owned()
}
