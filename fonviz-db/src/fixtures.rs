//! Scratch sqlite stores shaped like the production tables.

use sea_orm::{ConnectionTrait, DbBackend, Statement};
use tempfile::TempDir;

use crate::{Attribute, DbError, FonDb, PRICE_TABLE, TITLE_TABLE};

pub const FIXTURE_FILE: &str = "funds.db";

/// `(code, date, price, stock, precious_metals)`, newest rows first so that
/// nothing can lean on insertion order.
const PRICES: &[(&str, &str, f64, f64, f64)] = &[
    ("GLD", "2022-11-20", 12.5, 0.0, 95.0),
    ("GLD", "2022-11-01", 12.0, 0.0, 95.0),
    ("GLD", "2022-10-15", 11.0, 0.0, 95.0),
    ("GLD", "2022-10-01", 10.0, 0.0, 95.0),
    ("EQT", "2022-11-01", 19.0, 88.0, 0.0),
    ("EQT", "2022-10-15", 22.0, 92.0, 0.0),
    ("EQT", "2022-10-01", 20.0, 88.0, 0.0),
    ("SLV", "2022-10-10", 5.0, 10.0, 80.0),
    ("ZER", "2022-10-15", 1.0, 50.0, 0.0),
    ("ZER", "2022-10-01", 0.0, 50.0, 0.0),
];

const TITLES: &[(&str, &str)] = &[
    ("GLD", "GOLD FUND II"),
    ("EQT", "EQUITY GROWTH FUND"),
    ("SLV", "GÜMÜŞ KATILIM FONU"),
    ("ZER", "ZERO START 100% FUND"),
];

pub async fn create_schema(db: &FonDb) -> Result<(), DbError> {
    let attributes: String = Attribute::ALL
        .iter()
        .map(|attribute| format!(", \"{}\" REAL", attribute.column()))
        .collect();
    let conn = db.connection();
    // rollback journal keeps the file readable through a later `mode=ro` handle
    conn.execute_unprepared("PRAGMA journal_mode = DELETE").await?;
    conn.execute_unprepared(&format!(
        "CREATE TABLE {PRICE_TABLE} (code TEXT NOT NULL, date DATE NOT NULL, price REAL{attributes})"
    ))
    .await?;
    conn.execute_unprepared(&format!(
        "CREATE TABLE {TITLE_TABLE} (code TEXT NOT NULL, title TEXT NOT NULL)"
    ))
    .await?;
    Ok(())
}

pub async fn insert_price(
    db: &FonDb,
    code: &str,
    date: &str,
    price: f64,
    stock: f64,
) -> Result<(), DbError> {
    insert_price_row(db, code, date, price, stock, 0.0).await
}

async fn insert_price_row(
    db: &FonDb,
    code: &str,
    date: &str,
    price: f64,
    stock: f64,
    precious_metals: f64,
) -> Result<(), DbError> {
    db.connection()
        .execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            format!(
                "INSERT INTO {PRICE_TABLE} (code, date, price, stock, precious_metals) VALUES (?, ?, ?, ?, ?)"
            ),
            vec![
                code.into(),
                date.into(),
                price.into(),
                stock.into(),
                precious_metals.into(),
            ],
        ))
        .await?;
    Ok(())
}

pub async fn insert_title(db: &FonDb, code: &str, title: &str) -> Result<(), DbError> {
    db.connection()
        .execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            format!("INSERT INTO {TITLE_TABLE} (code, title) VALUES (?, ?)"),
            vec![code.into(), title.into()],
        ))
        .await?;
    Ok(())
}

/// Creates `funds.db` in a fresh temp dir, fills it with a few funds and
/// returns a writable handle. Keep the dir alive for as long as the handle.
pub async fn scratch_db() -> (TempDir, FonDb) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(FIXTURE_FILE);
    let db = FonDb::connect(format!("sqlite://{}?mode=rwc", path.display()))
        .await
        .expect("scratch db");
    create_schema(&db).await.expect("schema");
    for (code, date, price, stock, precious_metals) in PRICES {
        insert_price_row(&db, code, date, *price, *stock, *precious_metals)
            .await
            .expect("price row");
    }
    for (code, title) in TITLES {
        insert_title(&db, code, title).await.expect("title row");
    }
    (dir, db)
}
