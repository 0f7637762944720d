use anyhow::Result;
use fonviz_db::FonDb;

use crate::config::AppConfig;

pub(crate) async fn run(config: &AppConfig, code: &str, raw: bool) -> Result<()> {
    let db = FonDb::open(&config.db_file).await?;
    if raw {
        for price in db.get_prices(code).await? {
            println!("{price}");
        }
        db.close().await?;
        return Ok(());
    }
    let series = db.get_price_series(code).await?;
    db.close().await?;
    if series.is_empty() {
        println!("No prices stored for {code}.");
    }
    for point in series.points {
        println!("{}  {:.6}", point.date, point.price);
    }
    Ok(())
}
