use anyhow::Context;
use clap::Parser;
use clomonitor::{cli, client, config, prefs, render};
use clomonitor_common::Pagination;
use cli::{Cli, Commands};
use client::ApiClient;
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!("clomonitor={level},clomonitor_common={level}"))
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let mut config = Config::load().context("設定ファイルの読み込みに失敗しました")?;
    let base_url = config.resolve_api_base_url(cli.api_url.as_deref());
    debug!("API: {}", base_url);
    let api = || ApiClient::new(&base_url, config.timeout_seconds);

    match cli.command {
        Commands::Search(args) => {
            let store = prefs::open_store(&config.prefs_path()?);
            let query = args.to_query(store.prefs())?;

            let pb = spinner("検索中...");
            let result = api()?.search_projects(&query).await;
            pb.finish_and_clear();
            let results = result.context("検索に失敗しました")?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                let pagination = Pagination::new(results.total(), query.limit, query.filters.page_number);
                print!("{}", render::render_search_results(&results, &pagination));
            }
        }

        Commands::Project { foundation, name, snapshot, json } => {
            let snapshot = snapshot.as_deref().map(cli::validate_date).transpose()?;

            let pb = spinner("取得中...");
            let result = api()?.get_project_detail(&foundation, &name, snapshot.as_deref()).await;
            pb.finish_and_clear();
            let detail = result.with_context(|| format!("{}/{} の取得に失敗しました", foundation, name))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print!("{}", render::render_project(&detail));
            }
        }

        Commands::Report { foundation, project, repository } => {
            let pb = spinner("取得中...");
            let result = api()?.get_repository_report(&foundation, &project, &repository).await;
            pb.finish_and_clear();
            println!("{}", result.context("レポートの取得に失敗しました")?);
        }

        Commands::Stats { foundation, snapshot, json } => {
            let snapshot = snapshot.as_deref().map(cli::validate_date).transpose()?;

            let pb = spinner("取得中...");
            let result = api()?.get_stats(foundation.as_deref(), snapshot.as_deref()).await;
            pb.finish_and_clear();
            let stats = result.context("統計の取得に失敗しました")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", render::render_stats(&stats));
            }
        }

        Commands::ExportCsv { output } => {
            let pb = spinner("ダウンロード中...");
            let result = api()?.get_repositories_csv().await;
            pb.finish_and_clear();
            let csv = result.context("CSVの取得に失敗しました")?;

            std::fs::write(&output, csv)
                .with_context(|| format!("保存に失敗しました: {}", output.display()))?;
            println!("✔ 保存しました: {}", output.display());
        }

        Commands::Prefs { show, limit, sort_by, sort_direction, theme, interactive } => {
            let path = config.prefs_path()?;
            let mut store = prefs::open_store(&path);

            let update = if interactive {
                prefs::prompt_update(store.prefs())?
            } else {
                prefs::PrefsUpdate { limit, sort_by, sort_direction, theme }
            };

            if !update.is_empty() {
                prefs::apply_update(&mut store, update)?;
                println!("✔ 設定を保存しました: {}", path.display());
            }

            if show || update.is_empty() {
                print!("{}", render::render_prefs(store.prefs()));
            }
        }

        Commands::Config { set_api_url, show } => {
            if let Some(url) = set_api_url {
                config.set_api_base_url(url)?;
                println!("✔ APIのURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  API: {}", config.resolve_api_base_url(cli.api_url.as_deref()));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  表示設定ファイル: {}", config.prefs_path()?.display());
            }
        }
    }

    Ok(())
}
