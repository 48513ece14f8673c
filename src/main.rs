mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use console::style;
use highlight_reel::component::HighlightReel;
use highlight_reel::config::ToolSettings;
use highlight_reel::init;
use highlight_reel::signal::setup_shutdown_signal;

fn main() -> Result<()> {
    init::init();
    let cli = Cli::parse();

    let settings = ToolSettings::load(cli.settings.as_deref());
    let shutdown_signal = setup_shutdown_signal()?;

    println!("{}", style("=== 精華影片 ===").cyan().bold());
    let reel = HighlightReel::new(cli.parameters(), settings, shutdown_signal);

    let report = match reel.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", style("錯誤:").red().bold(), e);
            std::process::exit(1);
        }
    };

    println!();
    println!("  來源影片: {} 個", style(report.sources.len()).green());
    if !report.skipped.is_empty() {
        println!("  略過: {} 個", style(report.skipped.len()).yellow());
        for path in &report.skipped {
            println!("    - {}", path.display());
        }
    }
    println!("  目標解析度: {}", report.target_resolution);
    println!(
        "  片段: {} 個，共 {:.1}s",
        report.reel.segment_count, report.reel.duration_seconds
    );
    if let Some(dir) = &report.reel.segments_dir {
        println!("  中間片段: {}", dir.display());
    }
    println!(
        "{} {}",
        style("已輸出:").green().bold(),
        report.reel.output_path.display()
    );

    Ok(())
}
