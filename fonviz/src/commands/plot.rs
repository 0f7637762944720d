use std::path::Path;

use anyhow::{bail, Context, Result};
use fonviz_api_types::DateRange;
use fonviz_charts::{render_png, render_svg, ChartOptions};
use fonviz_db::FonDb;
use tracing::info;

use super::selection;
use crate::{cli::Selection, config::AppConfig};

enum OutputFormat {
    Png,
    Svg,
}

fn output_format(output: &Path) -> Result<OutputFormat> {
    match output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => Ok(OutputFormat::Png),
        Some("svg") => Ok(OutputFormat::Svg),
        _ => bail!("unsupported chart format {}, use .png or .svg", output.display()),
    }
}

pub(crate) async fn run(
    config: &AppConfig,
    selection: &Selection,
    window: DateRange,
    normalize: bool,
    output: &Path,
    title: Option<String>,
) -> Result<()> {
    let format = output_format(output)?;
    let db = FonDb::open(&config.db_file).await?;
    let codes = selection::resolve(&db, selection).await?;
    let mut series = Vec::with_capacity(codes.len());
    for code in &codes {
        series.push(
            db.get_price_series_between(code, window, normalize)
                .await
                .with_context(|| format!("loading prices for {code}"))?,
        );
    }
    // a single fund gets its full name as caption
    let title = match (title, codes.as_slice()) {
        (Some(title), _) => Some(title),
        (None, [code]) => db.find_title(code).await?,
        (None, _) => None,
    };
    db.close().await?;

    let options = ChartOptions {
        title,
        date_range: Some(window),
        ..Default::default()
    };
    match format {
        OutputFormat::Svg => std::fs::write(output, render_svg(&series, &options)?)?,
        OutputFormat::Png => std::fs::write(output, render_png(&series, &options)?)?,
    }
    info!("wrote chart of {} funds to {}", series.len(), output.display());
    println!("{}", output.display());
    Ok(())
}
