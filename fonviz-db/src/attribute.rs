use std::{fmt, str::FromStr};

use crate::DbError;

/// Asset composition columns of the price table that may be filtered on.
///
/// This is the only way a column name reaches a query, so the set is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Stock,
    GovernmentBond,
    TreasuryBill,
    CorporateBond,
    Eurobond,
    ForeignEquity,
    PreciousMetals,
    Repo,
    TermDeposit,
    ParticipationAccount,
    Other,
}

impl Attribute {
    pub const ALL: [Attribute; 11] = [
        Attribute::Stock,
        Attribute::GovernmentBond,
        Attribute::TreasuryBill,
        Attribute::CorporateBond,
        Attribute::Eurobond,
        Attribute::ForeignEquity,
        Attribute::PreciousMetals,
        Attribute::Repo,
        Attribute::TermDeposit,
        Attribute::ParticipationAccount,
        Attribute::Other,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            Attribute::Stock => "stock",
            Attribute::GovernmentBond => "government_bond",
            Attribute::TreasuryBill => "treasury_bill",
            Attribute::CorporateBond => "corporate_bond",
            Attribute::Eurobond => "eurobond",
            Attribute::ForeignEquity => "foreign_equity",
            Attribute::PreciousMetals => "precious_metals",
            Attribute::Repo => "repo",
            Attribute::TermDeposit => "term_deposit",
            Attribute::ParticipationAccount => "participation_account",
            Attribute::Other => "other",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Attribute {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        Attribute::ALL
            .into_iter()
            .find(|attribute| attribute.column() == name)
            .ok_or_else(|| DbError::UnknownAttribute(s.to_string()))
    }
}
