//! Page type definitions.
//!
//! This module defines [`PageType`], the tag a caller attaches to a page so
//! the registry can pick the extractor for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScrapeError;

/// Kind of scraped page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    /// Quarterly/annual fiscal period table.
    FinancialTable,
    /// Balance sheet statement.
    BalanceSheet,
    /// Cash flow statement.
    CashFlow,
}

impl PageType {
    /// All known page types.
    pub const ALL: [Self; 3] = [Self::FinancialTable, Self::BalanceSheet, Self::CashFlow];

    /// Parses a wire name into a page type.
    ///
    /// `"finanical_table"` is accepted as an alias of `"financial_table"`
    /// since existing collectors send that spelling.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "financial_table" | "finanical_table" => Some(Self::FinancialTable),
            "balance_sheet" => Some(Self::BalanceSheet),
            "cash_flow" => Some(Self::CashFlow),
            _ => None,
        }
    }

    /// Returns the canonical wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FinancialTable => "financial_table",
            Self::BalanceSheet => "balance_sheet",
            Self::CashFlow => "cash_flow",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageType {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ScrapeError::UnsupportedPageType(s.to_string()))
    }
}
