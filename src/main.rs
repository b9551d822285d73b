use dotenvy::dotenv;
use pie_partition::{
    PartitionStore, Result,
    config::chart::load_default_config,
    core::{progress::allocation_color, settle::TokioScheduler},
};
use std::{
    io::{self, Write},
    sync::Arc,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Writes the chart as a standalone SVG document.
fn render_svg(store: &PartitionStore, out: &mut impl Write) -> Result<()> {
    let geometry = store.geometry();
    let width = geometry.center_x * 2.0;
    let height = geometry.center_y * 2.0;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    for sector in store.sectors_with_angles() {
        writeln!(
            out,
            r#"  <path d="{}" fill="{}"><title>{} ({}%)</title></path>"#,
            store.sector_path(&sector),
            sector.sector.color,
            escape_xml(&sector.sector.name),
            sector.sector.percentage
        )?;
    }
    writeln!(
        out,
        r#"  <circle cx="{}" cy="{}" r="6" fill="{}"/>"#,
        geometry.center_x,
        geometry.center_y,
        allocation_color(store.total_percentage())
    )?;
    writeln!(out, "</svg>")?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // 2. Load .env file; variables can also be set externally
    dotenv().ok();

    // 3. Load chart configuration
    let config = load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Build the store on this runtime
    let scheduler = Arc::new(TokioScheduler::current()?);
    let store = PartitionStore::from_config(&config, scheduler)?;
    info!(
        remaining = store.remaining_percentage(),
        "Rendering {} sectors",
        store.len()
    );

    // 5. Render
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_svg(&store, &mut out)?;
    out.flush()?;

    Ok(())
}
