//! Column role resolution
//!
//! Each semantic role has an ordered list of accepted header aliases. The
//! first alias present in the dataset wins; matching is exact and
//! case-sensitive. A role with no matching alias resolves to `None`, and
//! every quantity derived from it defaults to zero.

use crate::Dataset;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Semantic column roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Revenue,
    Expense,
    Receivable,
    Payable,
    Loan,
    Inventory,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 6] = [
        ColumnRole::Revenue,
        ColumnRole::Expense,
        ColumnRole::Receivable,
        ColumnRole::Payable,
        ColumnRole::Loan,
        ColumnRole::Inventory,
    ];

    /// Built-in aliases, in priority order
    pub fn default_aliases(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::Revenue => &["revenue", "cash_in", "income", "sales"],
            ColumnRole::Expense => &["expenses", "cash_out", "cost", "spending"],
            ColumnRole::Receivable => &["accounts_receivable", "receivables"],
            ColumnRole::Payable => &["accounts_payable", "payables"],
            ColumnRole::Loan => &["loan_amount", "loan_balance", "debt"],
            ColumnRole::Inventory => &["inventory_value", "inventory"],
        }
    }

    /// Parse a role name as used in config files
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "revenue" => Some(ColumnRole::Revenue),
            "expense" | "expenses" => Some(ColumnRole::Expense),
            "receivable" | "receivables" => Some(ColumnRole::Receivable),
            "payable" | "payables" => Some(ColumnRole::Payable),
            "loan" => Some(ColumnRole::Loan),
            "inventory" => Some(ColumnRole::Inventory),
            _ => None,
        }
    }
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Revenue => write!(f, "revenue"),
            ColumnRole::Expense => write!(f, "expense"),
            ColumnRole::Receivable => write!(f, "receivable"),
            ColumnRole::Payable => write!(f, "payable"),
            ColumnRole::Loan => write!(f, "loan"),
            ColumnRole::Inventory => write!(f, "inventory"),
        }
    }
}

/// Pick the first alias present in `columns`
pub fn resolve<S: AsRef<str>>(columns: &[String], aliases: &[S]) -> Option<String> {
    aliases
        .iter()
        .map(|alias| alias.as_ref())
        .find(|alias| columns.iter().any(|c| c.as_str() == *alias))
        .map(str::to_string)
}

/// Alias table for all roles
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAliases {
    entries: Vec<(ColumnRole, Vec<String>)>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            entries: ColumnRole::ALL
                .iter()
                .map(|role| {
                    let aliases = role.default_aliases().iter().map(|s| s.to_string()).collect();
                    (*role, aliases)
                })
                .collect(),
        }
    }
}

impl ColumnAliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append extra aliases for a role. They rank after the existing ones.
    pub fn with_extra<I, S>(mut self, role: ColumnRole, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some((_, aliases)) = self.entries.iter_mut().find(|(r, _)| *r == role) {
            for alias in extra {
                let alias = alias.into();
                if !aliases.contains(&alias) {
                    aliases.push(alias);
                }
            }
        }
        self
    }

    pub fn aliases(&self, role: ColumnRole) -> &[String] {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, a)| a.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve every role against a dataset
    pub fn resolve_all(&self, dataset: &Dataset) -> ResolvedColumns {
        let mut resolved = ResolvedColumns::default();
        for role in ColumnRole::ALL {
            let column = resolve(dataset.columns(), self.aliases(role));
            if column.is_none() {
                info!(role = %role, "no matching column, derived values default to zero");
            }
            resolved.set(role, column);
        }
        resolved
    }
}

/// Resolved header per role (`None` = absent)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedColumns {
    pub revenue: Option<String>,
    pub expense: Option<String>,
    pub receivable: Option<String>,
    pub payable: Option<String>,
    pub loan: Option<String>,
    pub inventory: Option<String>,
}

impl ResolvedColumns {
    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        let slot = match role {
            ColumnRole::Revenue => &self.revenue,
            ColumnRole::Expense => &self.expense,
            ColumnRole::Receivable => &self.receivable,
            ColumnRole::Payable => &self.payable,
            ColumnRole::Loan => &self.loan,
            ColumnRole::Inventory => &self.inventory,
        };
        slot.as_deref()
    }

    fn set(&mut self, role: ColumnRole, column: Option<String>) {
        let slot = match role {
            ColumnRole::Revenue => &mut self.revenue,
            ColumnRole::Expense => &mut self.expense,
            ColumnRole::Receivable => &mut self.receivable,
            ColumnRole::Payable => &mut self.payable,
            ColumnRole::Loan => &mut self.loan,
            ColumnRole::Inventory => &mut self.inventory,
        };
        *slot = column;
    }

    /// Roles that did not resolve
    pub fn missing(&self) -> Vec<ColumnRole> {
        ColumnRole::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }
}
