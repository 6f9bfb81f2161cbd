//! CLI integration tests that need no network access.

#![allow(deprecated)] // Command::cargo_bin deprecated for custom build-dir; still works for default

use assert_cmd::Command;
use pretty_assertions::assert_eq;

fn lumina() -> Command {
    Command::cargo_bin("lumina").unwrap()
}

fn write_favorites(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("favs.json");
    let books = serde_json::json!([{
        "id": "gutendex-2701",
        "etag": "gutendex-2701",
        "selfLink": "https://gutendex.com/books/2701",
        "volumeInfo": {
            "title": "Moby Dick; Or, The Whale",
            "authors": ["Melville, Herman"],
            "previewLink": "https://www.gutenberg.org/ebooks/2701.html.images"
        },
        "accessInfo": {
            "viewability": "ALL_PAGES",
            "publicDomain": true,
            "epub": {"isAvailable": true, "downloadLink": "https://www.gutenberg.org/ebooks/2701.epub3.images"},
            "pdf": {"isAvailable": false},
            "webReaderLink": "https://www.gutenberg.org/ebooks/2701.html.images"
        }
    }]);
    std::fs::write(&path, serde_json::to_vec(&books).unwrap()).unwrap();
    path
}

#[test]
fn help_prints_and_exits_success() {
    lumina().arg("--help").assert().success();
}

#[test]
fn topics_lists_genres() {
    let out = lumina().arg("topics").assert().success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    assert!(stdout.lines().any(|l| l == "Science Fiction"));
    assert_eq!(stdout.lines().count(), 10);
}

#[test]
fn topics_json_valid() {
    let out = lumina().args(["topics", "--json"]).assert().success();
    let json: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(json[3]["query"], "science fiction");
}

#[test]
fn config_show_json_valid() {
    let out = lumina().args(["config", "show", "--json"]).assert().success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    let _: serde_json::Value = serde_json::from_str(stdout).expect("config show --json should output valid JSON");
}

#[test]
fn blank_search_prints_no_results() {
    let out = lumina().args(["search", "   "]).assert().success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    assert!(stdout.contains("No results."));
}

#[test]
fn favorites_list_empty_when_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("none.json");
    let out = lumina()
        .args(["favorites", "list", "--json", "--favorites"])
        .arg(&path)
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn favorites_list_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_favorites(dir.path());

    let out = lumina().args(["favorites", "list", "--favorites"]).arg(&path).assert().success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    assert!(stdout.contains("Moby Dick; Or, The Whale by Melville, Herman"));
    assert!(stdout.contains("Id: gutendex-2701"));

    lumina()
        .args(["favorites", "remove", "gutendex-2701", "--favorites"])
        .arg(&path)
        .assert()
        .success();
    let saved: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(saved, serde_json::json!([]));

    lumina()
        .args(["favorites", "remove", "gutendex-2701", "--favorites"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn open_prints_reader_and_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_favorites(dir.path());
    let out = lumina()
        .args(["open", "gutendex-2701", "--json", "--favorites"])
        .arg(&path)
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(json["reader"], "https://www.gutenberg.org/ebooks/2701.html.images");
    assert_eq!(json["downloads"][0]["format"], "epub");
    assert_eq!(json["downloads"].as_array().unwrap().len(), 1);
}

#[test]
fn open_and_related_unknown_id_fail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favs.json");
    lumina().args(["open", "nope", "--favorites"]).arg(&path).assert().failure();
    lumina().args(["related", "nope", "--favorites"]).arg(&path).assert().failure();
}
