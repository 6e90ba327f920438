//! `gamechat doctor`: Diagnose configuration, dataset, and provider.

use gamechat_config::AppConfig;
use gamechat_dataset::GameTable;
use gamechat_dataset::summary::load_summaries;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 GameChat Doctor: System Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"));
    if path.exists() {
        println!("  ✅ Config file found: {}", path.display());
    } else {
        println!("  ⚠️  No config file at {}, using defaults", path.display());
    }

    let config = match AppConfig::load_with(config_path) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 issue(s) found. See above for details.");
            return Ok(());
        }
    };

    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ⚠️  No API key; set OPENAI_API_KEY or api_key in config.toml");
        issues += 1;
    }

    match GameTable::from_csv_path(&config.dataset.games_csv) {
        Ok(table) => println!(
            "  ✅ Dataset loaded: {} rows, {} columns",
            table.len(),
            table.columns().len()
        ),
        Err(e) => {
            println!("  ❌ Dataset unreadable: {e}");
            issues += 1;
        }
    }

    match load_summaries(&config.dataset.summary_path) {
        Ok(Some(summaries)) => println!("  ✅ Column summaries: {} columns", summaries.len()),
        Ok(None) => println!(
            "  ⚠️  No column summaries yet; they are generated on first start (or run `gamechat summarize`)"
        ),
        Err(e) => {
            println!("  ❌ Column summaries unreadable: {e}");
            issues += 1;
        }
    }

    match gamechat_providers::router::build_from_config(&config) {
        Ok(router) => match router.default() {
            Some(provider) => match provider.health_check().await {
                Ok(true) => println!("  ✅ Provider '{}' reachable", provider.name()),
                Ok(false) => {
                    println!("  ⚠️  Provider '{}' answered but is not healthy", provider.name());
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ Provider '{}' unreachable: {e}", provider.name());
                    issues += 1;
                }
            },
            None => {
                println!("  ❌ No default provider configured");
                issues += 1;
            }
        },
        Err(e) => {
            println!("  ❌ Provider setup failed: {e}");
            issues += 1;
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
