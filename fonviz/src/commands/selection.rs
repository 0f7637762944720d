use anyhow::{bail, Result};
use fonviz_db::FonDb;
use tracing::info;

use crate::cli::{Selection, Threshold};

fn push_unique(codes: &mut Vec<String>, found: impl IntoIterator<Item = String>) {
    for code in found {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
}

pub(crate) async fn codes_above(db: &FonDb, threshold: Threshold) -> Result<Vec<String>> {
    Ok(db
        .get_codes_with_attribute_above(threshold.attribute, threshold.value)
        .await?)
}

pub(crate) async fn codes_below(db: &FonDb, threshold: Threshold) -> Result<Vec<String>> {
    Ok(db
        .get_codes_with_attribute_below(threshold.attribute, threshold.value)
        .await?)
}

/// Resolves every selector into one list of codes, explicit codes first,
/// without duplicates.
pub(crate) async fn resolve(db: &FonDb, selection: &Selection) -> Result<Vec<String>> {
    let mut codes = Vec::new();
    push_unique(
        &mut codes,
        selection.codes.iter().map(|code| code.trim().to_string()),
    );
    if let Some(threshold) = selection.above {
        push_unique(&mut codes, codes_above(db, threshold).await?);
    }
    if let Some(threshold) = selection.below {
        push_unique(&mut codes, codes_below(db, threshold).await?);
    }
    if let Some(keyword) = &selection.keyword {
        push_unique(&mut codes, db.find_codes_by_title_keyword(keyword).await?);
    }
    if codes.is_empty() {
        bail!("no funds selected, pass codes, --above, --below or --keyword");
    }
    info!("selected {} funds", codes.len());
    Ok(codes)
}
