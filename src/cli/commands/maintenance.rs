// 単体で使う掃除コマンド（prune / sweep / purge）

use crate::cleanup::{self, PruneSummary};
use crate::cli::commands::apply_output_dirs;
use crate::cli::OutputDirs;
use crate::config::TriageConfig;
use crate::core::Category;
use crate::sweeper::{self, SweepSummary};
use anyhow::Result;
use std::path::Path;

/// Prompt user for confirmation
fn confirm_purge(total_files: usize) -> Result<bool> {
    use std::io::{self, Write};

    print!("⚠️  {total_files} files will be PERMANENTLY DELETED. Continue? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// 空ディレクトリを削除する（指定ディレクトリ自体は残す）
pub fn execute_prune(directory: &Path) -> Result<PruneSummary> {
    if !directory.is_dir() {
        anyhow::bail!("ディレクトリが存在しません: {}", directory.display());
    }
    let summary = cleanup::prune_empty_dirs(directory, &[]);
    println!("削除: {} / エラー: {}", summary.removed, summary.errors);
    Ok(summary)
}

/// サイズが一致するファイルを削除する
pub fn execute_sweep(directory: &Path, size: u64, dry_run: bool) -> Result<SweepSummary> {
    if !directory.is_dir() {
        anyhow::bail!("ディレクトリが存在しません: {}", directory.display());
    }
    let summary = sweeper::sweep_by_size(directory, size, dry_run);
    for path in &summary.matched {
        println!("{}", path.display());
    }
    println!(
        "一致: {} / 削除: {} / エラー: {}",
        summary.matched.len(),
        summary.deleted,
        summary.errors
    );
    Ok(summary)
}

/// 仕分け済みの `mobile_*` / `pc_*` ファイルを削除する
pub fn execute_purge(
    config: TriageConfig,
    outputs: OutputDirs,
    no_confirm: bool,
) -> Result<SweepSummary> {
    let config = apply_output_dirs(config, &outputs);
    let targets = [
        (config.mobile_dir.as_path(), Category::Mobile),
        (config.pc_dir.as_path(), Category::Pc),
    ];
    let existing: Vec<_> = targets.iter().filter(|(dir, _)| dir.is_dir()).collect();

    let planned: usize = existing
        .iter()
        .map(|(dir, category)| {
            sweeper::purge_prefixed(dir, &format!("{}_", category.prefix()), true)
                .matched
                .len()
        })
        .sum();

    if planned == 0 {
        println!("✅ 削除するファイルがありません。");
        return Ok(SweepSummary::default());
    }
    if !no_confirm && !confirm_purge(planned)? {
        println!("❌ 処理をキャンセルしました。");
        return Ok(SweepSummary::default());
    }

    let mut total = SweepSummary::default();
    for (dir, category) in existing {
        let summary = sweeper::purge_prefixed(dir, &format!("{}_", category.prefix()), false);
        total.scanned += summary.scanned;
        total.deleted += summary.deleted;
        total.errors += summary.errors;
        total.matched.extend(summary.matched);
    }
    println!("削除: {} / エラー: {}", total.deleted, total.errors);
    Ok(total)
}
