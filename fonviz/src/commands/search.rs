use anyhow::Result;
use fonviz_db::FonDb;

use crate::config::AppConfig;

pub(crate) async fn run(config: &AppConfig, keyword: &str) -> Result<()> {
    let db = FonDb::open(&config.db_file).await?;
    let codes = db.find_codes_by_title_keyword(keyword).await?;
    if codes.is_empty() {
        println!("No funds found.");
    }
    for code in codes {
        let title = db.find_title(&code).await?.unwrap_or_default();
        println!("{code:<8} {title}");
    }
    db.close().await?;
    Ok(())
}
