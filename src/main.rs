use anyhow::Result;
use clap::Parser;
use image_triage::cli::{
    execute_catalog, execute_classify, execute_prune, execute_purge, execute_run, execute_sweep,
    load_config, Cli, Commands, RunOptions,
};
use image_triage::core::TriageError;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "image_triage=debug"
    } else if cli.quiet {
        "image_triage=warn"
    } else {
        "image_triage=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Ctrl-C は中断フラグを立てるだけ。処理中の1件が終わったところで止まる
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("中断を受け付けました。処理中の項目が終わり次第停止します");
            flag.store(true, Ordering::SeqCst);
        }
    });

    let outcome = tokio::task::spawn_blocking(move || dispatch(cli, cancel)).await;

    match outcome {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(error)) if is_interrupted(&error) => {
            tracing::warn!("ユーザーにより中断されました");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Ok(Err(error)) => {
            tracing::error!("{error:#}");
            eprintln!("❌ エラー: {error:#}");
            ExitCode::FAILURE
        }
        Err(join_error) => {
            tracing::error!(error = %join_error, "処理スレッドが異常終了しました");
            ExitCode::FAILURE
        }
    }
}

fn is_interrupted(error: &anyhow::Error) -> bool {
    matches!(error.downcast_ref::<TriageError>(), Some(TriageError::Interrupted))
}

fn dispatch(cli: Cli, cancel: Arc<AtomicBool>) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            input,
            outputs,
            password,
            suffix,
            dry_run,
            report,
        } => {
            let options = RunOptions {
                input,
                outputs,
                password,
                suffix,
                dry_run,
                report,
            };
            let summary = execute_run(config, options, cancel)?;
            if summary.entries_failed > 0 || summary.images.errors > 0 {
                tracing::warn!(
                    failed_archives = summary.entries_failed,
                    failed_images = summary.images.errors,
                    "一部の項目でエラーが発生しました"
                );
            }
        }
        Commands::Catalog { input, suffix } => {
            execute_catalog(config, input, suffix)?;
        }
        Commands::Classify {
            directory,
            label,
            outputs,
        } => {
            execute_classify(config, directory, label, outputs, cancel)?;
        }
        Commands::Prune { directory } => {
            execute_prune(&directory)?;
        }
        Commands::Sweep {
            directory,
            size,
            dry_run,
        } => {
            execute_sweep(&directory, size, dry_run)?;
        }
        Commands::Purge {
            outputs,
            no_confirm,
        } => {
            execute_purge(config, outputs, no_confirm)?;
        }
    }

    Ok(())
}
