//! Theme file emission.
//!
//! Writes the fixed set of theme files into the output directory, filling
//! the extracted sections into PHP template boilerplate. Existing files are
//! overwritten without merging; callers are responsible for backing up a
//! previous theme before regenerating.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::theme::assets::AssetMap;
use crate::theme::sections::ThemeSections;
use crate::util::{php_identifier, slugify};

/// Metadata for the style.css theme header block.
#[derive(Debug, Clone)]
pub struct ThemeMeta {
    pub name: String,
    pub version: String,
}

/// Write all five theme files.
pub fn write_theme(
    out_dir: &Path,
    sections: &ThemeSections,
    assets: &AssetMap,
    meta: &ThemeMeta,
) -> Result<()> {
    write_file(&out_dir.join("style.css"), &style_css(meta))?;
    write_file(&out_dir.join("functions.php"), &functions_php(assets, meta))?;
    write_file(&out_dir.join("header.php"), &header_php(sections, meta))?;
    write_file(&out_dir.join("footer.php"), &footer_php(sections, meta))?;
    write_file(&out_dir.join("index.php"), &index_php(sections))?;
    Ok(())
}

/// Copy top-level `*.html` pages (other than index.html) into the theme
/// root for reference. Returns the number of pages copied.
pub fn copy_pages(site_dir: &Path, out_dir: &Path) -> Result<usize> {
    let mut copied = 0;

    let mut entries: Vec<_> = fs::read_dir(site_dir)?.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name == "index.html" || !name.ends_with(".html") {
            continue;
        }
        fs::copy(&path, out_dir.join(name))?;
        copied += 1;
    }

    Ok(copied)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn style_css(meta: &ThemeMeta) -> String {
    format!(
        "/*\n\
         Theme Name: {name}\n\
         Theme URI: https://example.com/\n\
         Description: Generated from a static HTML site by pressgen\n\
         Version: {version}\n\
         */\n\
         \n\
         /* Site CSS lives under assets/; add overrides below. */\n",
        name = meta.name,
        version = meta.version,
    )
}

fn functions_php(assets: &AssetMap, meta: &ThemeMeta) -> String {
    let slug = slugify(&meta.name);
    let func = format!("{}_enqueue_assets", php_identifier(&meta.name));

    let mut lines = String::new();
    let _ = writeln!(
        lines,
        "\twp_enqueue_style('{slug}-style', get_stylesheet_uri());"
    );
    for (i, css) in assets.with_extension("css").enumerate() {
        let _ = writeln!(
            lines,
            "\twp_enqueue_style('{slug}-css-{i}', get_template_directory_uri() . '/assets/{css}');"
        );
    }
    for (i, js) in assets.with_extension("js").enumerate() {
        let _ = writeln!(
            lines,
            "\twp_enqueue_script('{slug}-js-{i}', get_template_directory_uri() . '/assets/{js}', array(), null, true);"
        );
    }

    format!(
        "<?php\n\
         function {func}() {{\n\
         {lines}\
         }}\n\
         add_action('wp_enqueue_scripts', '{func}');\n"
    )
}

fn header_php(sections: &ThemeSections, meta: &ThemeMeta) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<?php\n\
         /**\n\
         \x20* Header for the {name} theme.\n\
         \x20*/\n\
         ?><!doctype html>\n\
         <html <?php language_attributes(); ?>>\n\
         <head>\n\
         <meta charset=\"<?php bloginfo( 'charset' ); ?>\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        name = meta.name,
    );

    // Extracted head content goes before wp_head() so remote scripts and
    // rewritten stylesheet links are preserved.
    if !sections.head.trim().is_empty() {
        out.push_str(sections.head.trim());
        out.push('\n');
    }

    out.push_str(
        "<?php wp_head(); ?>\n\
         </head>\n\
         <body <?php body_class(); ?>>\n\
         <?php wp_body_open(); ?>\n",
    );

    if !sections.header.trim().is_empty() {
        out.push_str(sections.header.trim());
        out.push('\n');
    }

    out
}

fn footer_php(sections: &ThemeSections, meta: &ThemeMeta) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<?php\n\
         /**\n\
         \x20* Footer for the {name} theme.\n\
         \x20*/\n\
         ?>\n",
        name = meta.name,
    );

    if !sections.footer.trim().is_empty() {
        out.push_str(sections.footer.trim());
        out.push('\n');
    }

    out.push_str("<?php wp_footer(); ?>\n</body>\n</html>\n");
    out
}

fn index_php(sections: &ThemeSections) -> String {
    let main = sections.main.trim();

    // A real <main> landmark is emitted as-is; the loose-body fallback is
    // wrapped so the template always yields a main element.
    let content = if sections.main_is_landmark {
        main.to_string()
    } else {
        format!("<main>\n{main}\n</main>")
    };

    format!(
        "<?php\n\
         /*\n\
         \x20* Index template generated from the static site. Replace with a\n\
         \x20* dynamic loop as needed.\n\
         \x20*/\n\
         get_header();\n\
         ?>\n\
         {content}\n\
         <?php get_footer(); ?>\n"
    )
}
