use anyhow::Result;
use fonviz_db::{rank_changes, FonDb};

use super::selection;
use crate::{cli::Selection, config::AppConfig};

pub(crate) async fn run(config: &AppConfig, selection: &Selection, days: u32) -> Result<()> {
    let db = FonDb::open(&config.db_file).await?;
    let codes = selection::resolve(&db, selection).await?;
    let mut changes = db.compute_change(&codes, days).await?;
    db.close().await?;

    rank_changes(&mut changes);
    println!("change over the last {days} days");
    for change in &changes {
        println!("{:<8} {:>+9.2}%", change.code, change.change * 100.0);
    }
    let missing = codes.len() - changes.len();
    if missing > 0 {
        println!("{missing} funds had no prices in the window");
    }
    Ok(())
}
