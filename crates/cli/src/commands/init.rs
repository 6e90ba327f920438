//! `gamechat init`: Write a default config file.

use gamechat_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match config_path {
        Some(p) => p.to_path_buf(),
        None => AppConfig::config_dir().join("config.toml"),
    };

    println!("🎮 GameChat Setup");
    println!("===================\n");

    if let Some(dir) = config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            println!("✅ Created config directory: {}", dir.display());
        }
    }

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.\n");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Set OPENAI_API_KEY (or api_key in {})", config_path.display());
    println!("   2. Point [dataset] games_csv at your games CSV");
    println!("   3. Run: gamechat summarize, then gamechat serve\n");

    Ok(())
}
