use itertools::Itertools;
use sea_orm::{DbBackend, FromQueryResult, Statement, Value};
use tracing::{debug, instrument};

use crate::{Attribute, DbError, FonDb, PRICE_TABLE, TITLE_TABLE};

#[derive(Debug, FromQueryResult)]
struct CodeRow {
    code: String,
}

#[derive(Debug, FromQueryResult)]
struct TitleRow {
    title: String,
}

#[derive(Debug, FromQueryResult)]
struct CodeTitleRow {
    code: String,
    title: String,
}

#[derive(Clone, Copy)]
enum Comparison {
    Above,
    Below,
}

impl Comparison {
    fn operator(self) -> &'static str {
        match self {
            Comparison::Above => ">",
            Comparison::Below => "<",
        }
    }
}

impl FonDb {
    async fn fetch_codes(&self, sql: String, values: Vec<Value>) -> Result<Vec<String>, DbError> {
        let rows = CodeRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            sql,
            values,
        ))
        .all(self.connection())
        .await?;
        Ok(rows.into_iter().map(|row| row.code).collect())
    }

    async fn codes_by_attribute(
        &self,
        attribute: Attribute,
        comparison: Comparison,
        threshold: f64,
    ) -> Result<Vec<String>, DbError> {
        // the column name comes from the closed Attribute set, the threshold is bound
        let sql = format!(
            r#"SELECT DISTINCT code FROM {PRICE_TABLE}
                WHERE "{}" {} ?
                ORDER BY code ASC"#,
            attribute.column(),
            comparison.operator()
        );
        let codes = self.fetch_codes(sql, vec![threshold.into()]).await?;
        debug!("{} codes with {attribute} {} {threshold}", codes.len(), comparison.operator());
        Ok(codes)
    }

    /// Codes with at least one record where `attribute > threshold`.
    #[instrument(skip(self))]
    pub async fn get_codes_with_attribute_above(
        &self,
        attribute: Attribute,
        threshold: f64,
    ) -> Result<Vec<String>, DbError> {
        self.codes_by_attribute(attribute, Comparison::Above, threshold)
            .await
    }

    /// Codes with at least one record where `attribute < threshold`.
    #[instrument(skip(self))]
    pub async fn get_codes_with_attribute_below(
        &self,
        attribute: Attribute,
        threshold: f64,
    ) -> Result<Vec<String>, DbError> {
        self.codes_by_attribute(attribute, Comparison::Below, threshold)
            .await
    }

    /// Codes whose title contains `keyword`, ignoring case.
    ///
    /// Both sides are lower cased with full unicode rules, sqlite's `lower()`
    /// and `LIKE` only fold ascii.
    #[instrument(skip(self))]
    pub async fn find_codes_by_title_keyword(&self, keyword: &str) -> Result<Vec<String>, DbError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(DbError::EmptyKeyword);
        }
        let needle = keyword.to_lowercase();
        let rows = CodeTitleRow::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            format!(
                r#"SELECT code, title FROM {TITLE_TABLE}
                    WHERE title IS NOT NULL
                    ORDER BY code ASC"#
            ),
        ))
        .all(self.connection())
        .await?;
        let codes: Vec<String> = rows
            .into_iter()
            .filter(|row| row.title.to_lowercase().contains(&needle))
            .map(|row| row.code)
            .dedup()
            .collect();
        debug!("{} titles matched {keyword}", codes.len());
        Ok(codes)
    }

    pub async fn find_title(&self, code: &str) -> Result<Option<String>, DbError> {
        let row = TitleRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            format!("SELECT title FROM {TITLE_TABLE} WHERE code = ? LIMIT 1"),
            vec![code.into()],
        ))
        .one(self.connection())
        .await?;
        Ok(row.map(|row| row.title))
    }
}

#[cfg(test)]
mod test {
    use crate::{
        fixtures::{insert_title, scratch_db},
        Attribute, DbError,
    };

    #[tokio::test]
    async fn attribute_above_is_strict() {
        let (_dir, db) = scratch_db().await;
        // EQT has stock 92 on one record and 88 on the others
        let codes = db
            .get_codes_with_attribute_above(Attribute::Stock, 90.0)
            .await
            .unwrap();
        assert_eq!(codes, ["EQT"]);
        let codes = db
            .get_codes_with_attribute_above(Attribute::Stock, 92.0)
            .await
            .unwrap();
        assert!(codes.is_empty());
        let codes = db
            .get_codes_with_attribute_above(Attribute::PreciousMetals, 50.0)
            .await
            .unwrap();
        assert_eq!(codes, ["GLD", "SLV"]);
    }

    #[tokio::test]
    async fn attribute_below_is_strict() {
        let (_dir, db) = scratch_db().await;
        let codes = db
            .get_codes_with_attribute_below(Attribute::Stock, 10.0)
            .await
            .unwrap();
        assert_eq!(codes, ["GLD"]);
        let codes = db
            .get_codes_with_attribute_below(Attribute::Stock, 50.0)
            .await
            .unwrap();
        assert_eq!(codes, ["GLD", "SLV"]);
    }

    #[tokio::test]
    async fn keyword_is_case_insensitive() {
        let (_dir, db) = scratch_db().await;
        assert_eq!(db.find_codes_by_title_keyword("gold").await.unwrap(), ["GLD"]);
        assert_eq!(db.find_codes_by_title_keyword("Gold Fund").await.unwrap(), ["GLD"]);
        assert_eq!(db.find_codes_by_title_keyword("gümüş").await.unwrap(), ["SLV"]);
        assert_eq!(
            db.find_codes_by_title_keyword("fund").await.unwrap(),
            ["EQT", "GLD", "ZER"]
        );
        assert!(db.find_codes_by_title_keyword("platinum").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn keyword_matches_mixed_case_titles() {
        let (_dir, db) = scratch_db().await;
        insert_title(&db, "MIX", "Gümüş Katılım Fonu").await.unwrap();
        for keyword in ["gümüş", "GÜMÜŞ", "Gümüş"] {
            assert_eq!(
                db.find_codes_by_title_keyword(keyword).await.unwrap(),
                ["MIX", "SLV"],
                "{keyword}"
            );
        }
        // the stored upper case title folds to a dotted i
        assert_eq!(
            db.find_codes_by_title_keyword("katılım fonu").await.unwrap(),
            ["MIX"]
        );
    }

    #[tokio::test]
    async fn keyword_wildcards_match_literally() {
        let (_dir, db) = scratch_db().await;
        assert_eq!(db.find_codes_by_title_keyword("%").await.unwrap(), ["ZER"]);
        assert!(db.find_codes_by_title_keyword("_").await.unwrap().is_empty());
        assert!(db
            .find_codes_by_title_keyword("\" OR 1=1 --")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn empty_keyword_is_rejected() {
        let (_dir, db) = scratch_db().await;
        assert!(matches!(
            db.find_codes_by_title_keyword("  ").await,
            Err(DbError::EmptyKeyword)
        ));
    }

    #[tokio::test]
    async fn title_lookup() {
        let (_dir, db) = scratch_db().await;
        assert_eq!(
            db.find_title("GLD").await.unwrap().as_deref(),
            Some("GOLD FUND II")
        );
        assert_eq!(db.find_title("NOPE").await.unwrap(), None);
    }
}
