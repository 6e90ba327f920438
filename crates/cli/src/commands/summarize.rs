//! `gamechat summarize`: Generate the column summaries side file.

use gamechat_agent::ProviderColumnSummarizer;
use gamechat_dataset::GameTable;
use gamechat_dataset::summary::{generate_summaries, load_summaries, save_summaries};
use std::path::Path;

pub async fn run(config_path: Option<&Path>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let summary_path = &config.dataset.summary_path;

    if !force {
        if let Some(summaries) = load_summaries(summary_path)? {
            println!("  Summaries already exist at {} (use --force to regenerate)\n", summary_path.display());
            for s in &summaries {
                println!("  {:<40} {}", s.column_name, s.description);
            }
            return Ok(());
        }
    }

    let table = GameTable::from_csv_path(&config.dataset.games_csv)?;
    let router = gamechat_providers::router::build_from_config(&config)?;
    let provider = router.default().ok_or("No default provider configured")?;
    let summarizer = ProviderColumnSummarizer::new(provider, config.model());

    println!(
        "  Summarizing {} columns over {} rows with {}...",
        table.columns().len(),
        table.len(),
        config.model()
    );

    let summaries = generate_summaries(&table, &summarizer, config.dataset.sample_size).await?;
    save_summaries(summary_path, &summaries)?;

    for s in &summaries {
        println!("  {:<40} {}", s.column_name, s.description);
    }
    println!("\n✅ Wrote {}", summary_path.display());

    Ok(())
}
