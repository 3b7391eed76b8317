// エラー処理の統合テスト
use crate::fixtures::{file_names, write_archive, write_png, MockArchiveExtractor};
use image_triage::catalog::ArchiveCatalog;
use image_triage::config::TriageConfig;
use image_triage::core::{ExtractionResult, TriageError};
use image_triage::fs_ops;
use image_triage::image_loader::StandardImageProbe;
use image_triage::pipeline::{EntryState, Orchestrator};
use image_triage::reporting::NoOpProgressReporter;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_failed_issue_does_not_stop_batch() {
    let temp_dir = TempDir::new().unwrap();
    let config = TriageConfig::default()
        .with_input_dir(temp_dir.path().join("pic"))
        .with_output_dirs(temp_dir.path().join("m"), temp_dir.path().join("p"));
    let broken = write_archive(&config.input_dir, "101");
    write_archive(&config.input_dir, "102");
    write_archive(&config.input_dir, "103");

    let mut extractor = MockArchiveExtractor::new();
    extractor.expect_extract().times(3).returning(|archive, _, _| {
        if archive.ends_with("101.7z.001") {
            return Err(TriageError::ToolNotFound {
                executable: "Bandizip.exe".to_string(),
            });
        }
        write_png(&archive.parent().unwrap().join("img.png"), 1, 3);
        Ok(ExtractionResult::from_exit(0, ""))
    });

    let catalog =
        ArchiveCatalog::scan(&config.input_dir, &config.volume_suffix, false).unwrap();
    let orchestrator = Orchestrator::new(
        config.clone(),
        extractor,
        StandardImageProbe::new(),
        NoOpProgressReporter::new(),
    );
    let summary = orchestrator.run(&catalog).unwrap();

    assert_eq!(summary.entries_failed, 1);
    assert_eq!(summary.entries_completed, 2);
    assert_eq!(summary.entries[0].state, EntryState::ExtractFailed);
    assert!(broken.exists());
    assert_eq!(
        file_names(&config.mobile_dir),
        vec!["mobile_0102_0001.png", "mobile_0103_0001.png"]
    );
}

#[test]
fn test_truncated_image_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let config = TriageConfig::default()
        .with_input_dir(temp_dir.path().join("pic"))
        .with_output_dirs(temp_dir.path().join("m"), temp_dir.path().join("p"));
    write_archive(&config.input_dir, "200");

    let mut extractor = MockArchiveExtractor::new();
    extractor.expect_extract().returning(|archive, _, _| {
        let dir = archive.parent().unwrap();
        let full = dir.join("whole.png");
        write_png(&full, 64, 32);
        let bytes = fs::read(&full).unwrap();
        fs::write(dir.join("half.png"), &bytes[..bytes.len() / 2]).unwrap();
        Ok(ExtractionResult::from_exit(0, ""))
    });

    let catalog =
        ArchiveCatalog::scan(&config.input_dir, &config.volume_suffix, false).unwrap();
    let orchestrator = Orchestrator::new(
        config.clone(),
        extractor,
        StandardImageProbe::new(),
        NoOpProgressReporter::new(),
    );
    let summary = orchestrator.run(&catalog).unwrap();

    assert_eq!(summary.images.processed, 2);
    assert_eq!(summary.images.errors, 1);
    assert_eq!(file_names(&config.pc_dir), vec!["pc_0200_0001.png"]);
}

#[test]
fn test_readonly_file_is_deleted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("locked.png");
    fs::write(&path, b"x").unwrap();
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&path, permissions).unwrap();

    fs_ops::delete_file(&path).unwrap();
    assert!(!path.exists());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = TriageConfig::default().with_output_dirs("same", "same");
    assert!(matches!(
        config.validate(),
        Err(TriageError::Configuration { .. })
    ));
}
