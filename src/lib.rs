//! # pressgen
//!
//! Convert a static HTML site into a minimal WordPress theme.
//!
//! The converter parses the site's `index.html` leniently, extracts the
//! head/header/main/footer landmark sections, copies locally referenced
//! assets into the theme's `assets/` tree (rewriting references to
//! `get_template_directory_uri()` calls), and emits the fixed set of theme
//! files: `style.css`, `functions.php`, `header.php`, `footer.php` and
//! `index.php`.
//!
//! ## Quick start
//!
//! ```no_run
//! use pressgen::{convert_site, ConvertOptions};
//!
//! let report = convert_site(
//!     "site".as_ref(),
//!     "site/my-theme".as_ref(),
//!     &ConvertOptions::default(),
//! ).unwrap();
//! assert!(report.theme_dir.join("index.php").exists());
//! ```
//!
//! Missing landmarks and unresolvable local assets degrade with a warning;
//! only a missing/unreadable `index.html` or an unwritable output
//! directory fail the run.

pub mod dom;
pub mod error;
pub mod partials;
pub mod theme;
pub mod util;

pub use error::{Error, Result};
pub use theme::{convert_site, ConversionReport, ConvertOptions, ThemeSections};
