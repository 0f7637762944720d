use anyhow::{bail, Result};
use fonviz_db::FonDb;

use super::selection::{codes_above, codes_below};
use crate::{cli::Threshold, config::AppConfig};

pub(crate) async fn run(
    config: &AppConfig,
    above: Option<Threshold>,
    below: Option<Threshold>,
) -> Result<()> {
    if above.is_none() && below.is_none() {
        bail!("pass --above and/or --below");
    }
    let db = FonDb::open(&config.db_file).await?;
    let above = match above {
        Some(threshold) => Some(codes_above(&db, threshold).await?),
        None => None,
    };
    let below = match below {
        Some(threshold) => Some(codes_below(&db, threshold).await?),
        None => None,
    };
    db.close().await?;

    // with both bounds only funds passing each of them are listed
    let codes = match (above, below) {
        (Some(above), Some(below)) => above.into_iter().filter(|c| below.contains(c)).collect(),
        (Some(codes), None) | (None, Some(codes)) => codes,
        (None, None) => Vec::new(),
    };
    for code in codes {
        println!("{code}");
    }
    Ok(())
}
