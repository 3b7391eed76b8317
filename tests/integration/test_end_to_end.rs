// エンドツーエンド統合テスト
use crate::fixtures::{extractor_writing, file_names, write_archive, write_png};
use image_triage::catalog::ArchiveCatalog;
use image_triage::config::TriageConfig;
use image_triage::image_loader::StandardImageProbe;
use image_triage::pipeline::{EntryState, Orchestrator};
use image_triage::reporting::NoOpProgressReporter;
use std::fs;
use tempfile::TempDir;

fn config_for(root: &std::path::Path) -> TriageConfig {
    TriageConfig::default()
        .with_input_dir(root.join("pic"))
        .with_output_dirs(root.join("saveMobilePaper"), root.join("savePcPaper"))
        .with_password("secret")
}

#[test]
fn test_single_issue_is_sorted_and_removed() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(temp_dir.path());
    let archive = write_archive(&config.input_dir, "063");

    let catalog =
        ArchiveCatalog::scan(&config.input_dir, &config.volume_suffix, false).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("0063").unwrap().path, archive);

    let extractor = extractor_writing(vec![
        ("p1.png", 100, 200),
        ("l1.png", 300, 100),
        ("p2.png", 100, 100),
        ("l2.png", 400, 300),
        ("p3.png", 50, 90),
    ]);
    let orchestrator = Orchestrator::new(
        config.clone(),
        extractor,
        StandardImageProbe::new(),
        NoOpProgressReporter::new(),
    );
    let summary = orchestrator.run(&catalog).unwrap();

    assert_eq!(summary.entries_completed, 1);
    assert_eq!(summary.entries[0].state, EntryState::ArchiveRemoved);
    assert_eq!(summary.images.mobile, 3);
    assert_eq!(summary.images.pc, 2);
    assert_eq!(
        file_names(&config.mobile_dir),
        vec![
            "mobile_0063_0001.png",
            "mobile_0063_0002.png",
            "mobile_0063_0003.png"
        ]
    );
    assert_eq!(
        file_names(&config.pc_dir),
        vec!["pc_0063_0001.png", "pc_0063_0002.png"]
    );
    assert!(!config.input_dir.join("063").exists());
    assert!(config.input_dir.exists());
}

#[test]
fn test_counters_restart_per_issue() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(temp_dir.path());
    write_archive(&config.input_dir, "No.0631");
    write_archive(&config.input_dir, "2024");

    let catalog =
        ArchiveCatalog::scan(&config.input_dir, &config.volume_suffix, false).unwrap();
    let labels: Vec<_> = catalog.iter().map(|(label, _)| label.clone()).collect();
    assert_eq!(labels, vec!["0631", "2024"]);

    let extractor = extractor_writing(vec![("a.png", 10, 20), ("b.png", 10, 30)]);
    let orchestrator = Orchestrator::new(
        config.clone(),
        extractor,
        StandardImageProbe::new(),
        NoOpProgressReporter::new(),
    );
    orchestrator.run(&catalog).unwrap();

    assert_eq!(
        file_names(&config.mobile_dir),
        vec![
            "mobile_0631_0001.png",
            "mobile_0631_0002.png",
            "mobile_2024_0001.png",
            "mobile_2024_0002.png"
        ]
    );
}

#[test]
fn test_rerun_does_not_overwrite_previous_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(temp_dir.path());
    fs::create_dir_all(&config.pc_dir).unwrap();
    write_png(&config.pc_dir.join("pc_0063_0001.png"), 9, 3);
    write_archive(&config.input_dir, "063");

    let catalog =
        ArchiveCatalog::scan(&config.input_dir, &config.volume_suffix, false).unwrap();
    let orchestrator = Orchestrator::new(
        config.clone(),
        extractor_writing(vec![("wide.png", 8, 2)]),
        StandardImageProbe::new(),
        NoOpProgressReporter::new(),
    );
    orchestrator.run(&catalog).unwrap();

    assert_eq!(
        file_names(&config.pc_dir),
        vec!["pc_0063_0001.png", "pc_0063_0001_01.png"]
    );
}

#[test]
fn test_empty_leftover_dirs_are_pruned() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(temp_dir.path());
    fs::create_dir_all(config.input_dir.join("stale/nested")).unwrap();
    write_archive(&config.input_dir, "100");

    let catalog =
        ArchiveCatalog::scan(&config.input_dir, &config.volume_suffix, false).unwrap();
    let orchestrator = Orchestrator::new(
        config.clone(),
        extractor_writing(vec![("x.png", 2, 2)]),
        StandardImageProbe::new(),
        NoOpProgressReporter::new(),
    );
    orchestrator.run(&catalog).unwrap();

    assert!(!config.input_dir.join("stale").exists());
    assert!(config.input_dir.exists());
}

#[test]
fn test_output_dirs_nested_in_input_keep_every_image() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("pic");
    let config = TriageConfig::default()
        .with_input_dir(&input)
        .with_output_dirs(input.join("mobile"), input.join("pc"))
        .with_password("secret");
    write_archive(&input, "063");
    write_archive(&input, "064");

    let catalog =
        ArchiveCatalog::scan(&config.input_dir, &config.volume_suffix, false).unwrap();
    let orchestrator = Orchestrator::new(
        config.clone(),
        extractor_writing(vec![("tall.png", 100, 200), ("wide.png", 300, 100)]),
        StandardImageProbe::new(),
        NoOpProgressReporter::new(),
    );
    let summary = orchestrator.run(&catalog).unwrap();

    assert_eq!(summary.entries_completed, 2);
    assert_eq!(summary.images.errors, 0);
    assert_eq!(
        file_names(&config.mobile_dir),
        vec!["mobile_0063_0001.png", "mobile_0064_0001.png"]
    );
    assert_eq!(
        file_names(&config.pc_dir),
        vec!["pc_0063_0001.png", "pc_0064_0001.png"]
    );
    assert!(!input.join("063").exists());
    assert!(!input.join("064").exists());
}
