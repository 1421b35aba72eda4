//! Domain types shared by the scoring client and the dashboard

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credit decision returned by the scoring service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Decision {
    /// Credit granted
    Accepted,
    /// Credit refused
    Rejected,
}

impl Decision {
    /// Label used on the wire and in the dashboard text
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepted => "Accepte",
            Self::Rejected => "Refuse",
        }
    }

    /// Whether the credit was granted
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for Decision {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim() {
            "Accepte" | "Accepté" | "Accepted" => Ok(Self::Accepted),
            "Refuse" | "Refusé" | "Rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown decision value: {other:?}")),
        }
    }
}

impl From<Decision> for String {
    fn from(decision: Decision) -> Self {
        decision.label().to_string()
    }
}

/// Scoring result for one client, as served by `GET /client/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Age in years
    pub age: Option<f64>,
    /// Yearly income
    pub income: Option<f64>,
    /// Requested credit amount
    pub credit_amount: Option<f64>,
    /// Employment length in years
    pub employment_length: Option<f64>,

    /// Default probability score in [0, 1]
    pub score: f64,
    /// Accept/reject decision
    pub decision: Decision,

    /// Feature names of the model-wide importance
    pub global_importance_names: Vec<String>,
    /// Importance values aligned with `global_importance_names`
    pub global_importance_values: Vec<f64>,

    /// Feature names of the client-specific importance
    pub local_importance_names: Vec<String>,
    /// Importance values aligned with `local_importance_names`
    pub local_importance_values: Vec<f64>,

    /// The client's own value for each important variable, in service order
    #[serde(default)]
    pub client_important_values: IndexMap<String, Option<f64>>,
}

impl ClientRecord {
    /// Check the invariants the dashboard relies on
    ///
    /// # Errors
    ///
    /// Returns a validation error when an importance name/value pair is not
    /// index-aligned or the score is not a finite number.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.score.is_finite() {
            return Err(crate::Error::validation("score", "must be a finite number"));
        }
        check_aligned(
            "global_importance",
            &self.global_importance_names,
            &self.global_importance_values,
        )?;
        check_aligned(
            "local_importance",
            &self.local_importance_names,
            &self.local_importance_values,
        )
    }

    /// Model-wide importance as `(name, value)` pairs in service order
    pub fn global_importance(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.global_importance_names
            .iter()
            .map(String::as_str)
            .zip(self.global_importance_values.iter().copied())
    }

    /// Client-specific importance as `(name, value)` pairs in service order
    pub fn local_importance(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.local_importance_names
            .iter()
            .map(String::as_str)
            .zip(self.local_importance_values.iter().copied())
    }

    /// Variables offered for analysis, in service order
    pub fn important_variables(&self) -> impl Iterator<Item = &str> + '_ {
        self.client_important_values.keys().map(String::as_str)
    }

    /// The client's value for `variable`, if the variable is known and not null
    pub fn client_value(&self, variable: &str) -> Option<f64> {
        self.client_important_values.get(variable).copied().flatten()
    }
}

fn check_aligned(field: &str, names: &[String], values: &[f64]) -> crate::Result<()> {
    if names.len() != values.len() {
        return Err(crate::Error::validation(
            field,
            format!(
                "{} names but {} values; the sequences must be index-aligned",
                names.len(),
                values.len()
            ),
        ));
    }
    if let Some(position) = values.iter().position(|value| !value.is_finite()) {
        return Err(crate::Error::validation(
            field,
            format!("value at index {position} is not finite"),
        ));
    }
    Ok(())
}
