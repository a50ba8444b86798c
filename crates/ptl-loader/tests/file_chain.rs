//! End-to-end resolution of template files on disk.

use pretty_assertions::assert_eq;
use ptl_loader::{ErrorKind, LoaderError, TemplateLoader, TemplateLoaderError};
use ptl_template::TemplateUri;
use std::path::Path;

fn file_uri(path: &Path) -> String {
    TemplateUri::from_file_path(path).unwrap().to_string()
}

#[test]
fn resolves_mixed_yaml_and_json_chain() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root.yml");
    let middle = dir.path().join("middle.json");
    let leaf = dir.path().join("leaf.yaml");

    std::fs::write(
        &root,
        "schema: \"1\"\nid: root\nvariables:\n  - name: region\n    defaultValue: us-east-1\n",
    )
    .unwrap();
    std::fs::write(
        &middle,
        format!(
            r#"{{"id": "middle", "source": "{}", "stages": [{{"id": "bake"}}]}}"#,
            file_uri(&root)
        ),
    )
    .unwrap();
    std::fs::write(
        &leaf,
        format!("id: leaf\nsource: {}\nprotect: true\n", file_uri(&middle)),
    )
    .unwrap();

    let chain = TemplateLoader::with_defaults()
        .load_uri(&file_uri(&leaf))
        .unwrap();

    let ids: Vec<_> = chain.iter().map(|t| t.label()).collect();
    assert_eq!(ids, vec!["root", "middle", "leaf"]);
    assert!(chain[0].get("variables").is_some());
    assert!(chain[1].get("stages").is_some());
    assert!(chain[2].protect);
}

#[test]
fn missing_parent_file_names_the_parent() {
    let dir = tempfile::tempdir().unwrap();
    let leaf = dir.path().join("leaf.yml");
    let missing = dir.path().join("missing.yml");
    std::fs::write(&leaf, format!("id: leaf\nsource: {}\n", file_uri(&missing))).unwrap();

    let err = TemplateLoader::with_defaults()
        .load_uri(&file_uri(&leaf))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BackendFetchFailure);
    assert_eq!(err.offending_source(), file_uri(&missing));
    assert!(matches!(
        err,
        TemplateLoaderError::Fetch {
            source: LoaderError::NotFound(_),
            ..
        }
    ));
}

#[test]
fn file_cycle_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.yml");
    let b = dir.path().join("b.yml");
    std::fs::write(&a, format!("id: a\nsource: {}\n", file_uri(&b))).unwrap();
    std::fs::write(&b, format!("id: b\nsource: {}\n", file_uri(&a))).unwrap();

    let err = TemplateLoader::with_defaults()
        .load_uri(&file_uri(&a))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CycleDetected);
}

#[test]
fn undecodable_file_is_fetch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ \"id\": ").unwrap();

    let err = TemplateLoader::with_defaults()
        .load_uri(&file_uri(&broken))
        .unwrap_err();

    assert!(matches!(
        err,
        TemplateLoaderError::Fetch {
            source: LoaderError::Decode(_),
            ..
        }
    ));
}
