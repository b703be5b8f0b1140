//! Integration tests for the import pipeline over local exports.

use std::fs;
use std::path::Path;

use docpress::{
    document_id_from_url, ConvertOptions, DirectorySource, Error, Importer, MemorySink,
    ParseOptions, PostStatus,
};
use tempfile::TempDir;

const ARTICLE: &str = r#"{
    "title": "Bonjour le monde",
    "body": {"content": [
        {"paragraph": {"elements": [{"textRun": {"content": "Catégorie: Actualités\n"}}]}},
        {"paragraph": {"elements": [{"textRun": {"content": "Statut: private\n"}}]}},
        {"paragraph": {"elements": [{"textRun": {"content": "Premier article importé.\n"}}]}}
    ]}
}"#;

const UNTITLED: &str = r#"{"body": {"content": [
    {"paragraph": {"elements": [{"textRun": {"content": "Sans titre\n"}}]}}
]}}"#;

fn exports() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "article.json", ARTICLE);
    write(tmp.path(), "untitled.json", UNTITLED);
    write(tmp.path(), "notes.txt", "not an export");
    tmp
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_import_publishes_record() {
    let tmp = exports();
    let mut importer = Importer::new(DirectorySource::new(tmp.path()), MemorySink::new());

    let report = importer.import("article").unwrap();
    assert_eq!(report.document_id, "article");
    assert_eq!(report.title, "Bonjour le monde");
    assert_eq!(report.post.id, 1);
    assert_eq!(report.post.status, PostStatus::Private);
    assert!(report.diagnostics.is_empty());

    let (_, sink) = importer.into_parts();
    let post = sink.last().unwrap();
    assert_eq!(post.slug, "bonjour-le-monde");
    assert_eq!(post.categories, vec!["Actualités"]);
    assert_eq!(post.body, "Premier article importé.");
}

#[test]
fn test_import_rejects_untitled_document() {
    let tmp = exports();
    let mut importer = Importer::new(DirectorySource::new(tmp.path()), MemorySink::new());

    assert!(!importer.can_import("untitled"));
    assert!(matches!(importer.import("untitled"), Err(Error::Parse(_))));
    assert!(importer.sink().is_empty());
}

#[test]
fn test_missing_document() {
    let tmp = exports();
    let mut importer = Importer::new(DirectorySource::new(tmp.path()), MemorySink::new());

    assert!(!importer.can_import("nope"));
    assert!(matches!(importer.import("nope"), Err(Error::Fetch(_))));
    assert!(matches!(importer.import("../article"), Err(Error::Fetch(_))));
}

#[test]
fn test_list_only_json_exports() {
    let tmp = exports();
    let importer = Importer::new(DirectorySource::new(tmp.path()), MemorySink::new());

    let mut ids: Vec<String> = importer
        .list(10)
        .unwrap()
        .into_iter()
        .map(|summary| summary.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["article", "untitled"]);

    assert_eq!(importer.list(1).unwrap().len(), 1);
}

#[test]
fn test_document_content_and_preview() {
    let tmp = exports();
    let importer = Importer::new(DirectorySource::new(tmp.path()), MemorySink::new())
        .with_options(ConvertOptions::default().with_excerpt_length(8));

    let outcome = importer.document_content("article").unwrap();
    assert_eq!(outcome.record.excerpt, "Premier...");

    let preview = importer.preview("article", 300).unwrap();
    assert_eq!(preview.categories, vec!["Actualités"]);
    assert_eq!(preview.word_count, 3);
    assert!(importer.sink().is_empty());
}

#[test]
fn test_import_by_url() {
    let tmp = exports();
    let mut importer = Importer::new(DirectorySource::new(tmp.path()), MemorySink::new());

    let id = document_id_from_url("https://docs.google.com/document/d/article/edit#heading=h.1")
        .unwrap();
    let report = importer.import(&id).unwrap();
    assert_eq!(report.title, "Bonjour le monde");
}

#[test]
fn test_decode_diagnostics_reach_the_report() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "partial.json",
        r#"{"title": "Partiel", "body": {"content": [
            {"paragraph": {"elements": "oops"}},
            {"paragraph": {"elements": [{"textRun": {"content": "Reste lisible.\n"}}]}}
        ]}}"#,
    );
    let source = DirectorySource::new(tmp.path()).with_parse_options(ParseOptions::new().lenient());
    let mut importer = Importer::new(source, MemorySink::new());

    let outcome = importer.document_content("partial").unwrap();
    assert_eq!(outcome.record.body, "Reste lisible.");
    assert_eq!(outcome.diagnostics().len(), 1);

    let report = importer.import("partial").unwrap();
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].starts_with("Skipped element 0"));
    assert_eq!(importer.sink().len(), 1);
}
