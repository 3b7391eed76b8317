// 外部解凍ツールの呼び出しテスト（偽ツールを使うため unix のみ）
#![cfg(unix)]

use crate::fixtures::{file_names, write_archive, write_fake_tool, write_png};
use image_triage::core::{ArchiveExtractor, TriageError};
use image_triage::extractor::CommandExtractor;
use image_triage::tool_locator::ToolLocator;
use std::fs;
use tempfile::TempDir;

fn extractor_for(tool: &std::path::Path) -> CommandExtractor {
    let locator =
        ToolLocator::new("fake-bandizip-not-on-path", vec![tool.to_path_buf()]).with_program_dir(None);
    CommandExtractor::new(locator, ".7z.001")
}

#[test]
fn test_tool_receives_arguments_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let tool_dir = temp_dir.path().join("tool");
    let tool = write_fake_tool(&tool_dir, 0);
    write_png(&tool_dir.join("payload/inner/a.png"), 2, 1);
    let archive = write_archive(&temp_dir.path().join("pic"), "063");

    let result = extractor_for(&tool)
        .extract(&archive, "secret", None)
        .unwrap();

    assert!(result.success);
    assert_eq!(result.exit_code, 0);
    let args = fs::read_to_string(tool_dir.join("args.log")).unwrap();
    let parent = archive.parent().unwrap();
    let expected = [
        "x".to_string(),
        "-p:secret".to_string(),
        "-y".to_string(),
        format!("-o:{}", parent.display()),
        "-aoa".to_string(),
        archive.display().to_string(),
    ];
    assert_eq!(args.lines().collect::<Vec<_>>(), expected);
    assert_eq!(file_names(&parent.join("inner")), vec!["a.png"]);
}

#[test]
fn test_tool_failure_keeps_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let tool = write_fake_tool(&temp_dir.path().join("tool"), 2);
    let archive = write_archive(&temp_dir.path().join("pic"), "063");

    let result = extractor_for(&tool)
        .extract(&archive, "wrong", None)
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.exit_code, 2);
    assert!(result.diagnostic.contains("Wrong password"));
    assert!(matches!(
        result.into_result(&archive),
        Err(TriageError::ExtractionFailed { exit_code: 2, .. })
    ));
}

#[test]
fn test_explicit_destination_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let tool_dir = temp_dir.path().join("tool");
    let tool = write_fake_tool(&tool_dir, 0);
    write_png(&tool_dir.join("payload/b.png"), 1, 1);
    let archive = write_archive(&temp_dir.path().join("pic"), "064");
    let dest = temp_dir.path().join("out/064");

    extractor_for(&tool)
        .extract(&archive, "", Some(dest.clone()))
        .unwrap();

    assert_eq!(file_names(&dest), vec!["b.png"]);
}

#[test]
fn test_missing_tool_is_distinct_error() {
    let temp_dir = TempDir::new().unwrap();
    let archive = write_archive(&temp_dir.path().join("pic"), "063");
    let extractor = extractor_for(&temp_dir.path().join("missing-tool"));

    assert!(matches!(
        extractor.extract(&archive, "", None),
        Err(TriageError::ToolNotFound { .. })
    ));
}
