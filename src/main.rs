mod app;
mod ui;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use jalali_picker::calendar::weekday;
use jalali_picker::config::AppConfig;
use jalali_picker::format::PERSIAN_WEEKDAYS;
use jalali_picker::JalaliDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // ── jcal convert <date> ───────────────────────────────────────────────────
    if args.get(1).map(|s| s.as_str()) == Some("convert") {
        let input = args.get(2).ok_or_else(|| anyhow!("usage: jcal convert <yyyy/mm/dd | yyyy-mm-dd>"))?;
        return cmd_convert(input);
    }

    // ── jcal (TUI) ────────────────────────────────────────────────────────────
    run_tui()
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jalali_picker=info,jcal=info"))
}

// ─── Convert command ──────────────────────────────────────────────────────────

fn cmd_convert(input: &str) -> Result<()> {
    // Logging to stderr so it doesn't interfere with the printed result
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter())
        .init();

    if input.contains('/') {
        let j: JalaliDate = input.parse()?;
        let g = j.to_gregorian()?;
        println!("{j}  →  {g}");
    } else {
        let g = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .with_context(|| format!("'{input}' is neither yyyy/mm/dd nor yyyy-mm-dd"))?;
        let j = JalaliDate::from_gregorian(g)?;
        println!("{g}  →  {j} ({})", PERSIAN_WEEKDAYS[weekday(g) as usize]);
    }
    Ok(())
}

// ─── TUI ─────────────────────────────────────────────────────────────────────

fn run_tui() -> Result<()> {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("jalali-picker");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "jcal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .with(env_filter())
        .init();

    tracing::info!("Starting jcal");

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("config not loaded, using defaults: {e}");
        AppConfig::default()
    });

    let mut app = App::new(cfg.picker());
    app.run()?;
    Ok(())
}
