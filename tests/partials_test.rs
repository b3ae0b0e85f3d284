//! Partial generator end-to-end tests.

use std::fs;

use pressgen::partials::{render_partials, write_partials};
use tempfile::TempDir;

#[test]
fn test_render_and_write_partials() {
    let root = TempDir::new().unwrap();

    let cards = root.path().join("cards");
    fs::create_dir_all(&cards).unwrap();
    fs::write(
        cards.join("data.json"),
        r#"{"objs": [{"name": "Ana"}, {"name": "Bor"}]}"#,
    )
    .unwrap();
    fs::write(cards.join("template.html"), "<li>{{ name }}</li>").unwrap();

    let loose_file = root.path().join("README.txt");
    fs::write(&loose_file, "not a partial").unwrap();

    let rendered = render_partials(root.path()).unwrap();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered["cards"], "<li>Ana</li><li>Bor</li>");

    let out = TempDir::new().unwrap();
    write_partials(&rendered, out.path()).unwrap();
    assert_eq!(
        fs::read_to_string(out.path().join("cards.html")).unwrap(),
        "<li>Ana</li><li>Bor</li>"
    );
}

#[test]
fn test_partials_output_is_sorted_and_stable() {
    let root = TempDir::new().unwrap();

    for name in ["zeta", "alpha"] {
        let dir = root.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("data.json"), r#"{"objs": [{"n": 1}]}"#).unwrap();
        fs::write(dir.join("template.html"), "<i>{{ n }}</i>").unwrap();
    }

    let rendered = render_partials(root.path()).unwrap();
    let names: Vec<_> = rendered.keys().cloned().collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}
