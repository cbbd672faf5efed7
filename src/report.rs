//! Human-readable rendering of allocations.
//!
//! Consumes [`Allocation`] values and never feeds anything back into the
//! solve. Labels in the table are one-based ("Agent 1"), unlike the
//! zero-based indices of the library and the JSON API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Allocation;

/// Named label/precision combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    #[default]
    Agents,
    Participants,
}

impl FromStr for StylePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "agents" => Ok(StylePreset::Agents),
            "participants" => Ok(StylePreset::Participants),
            other => Err(format!(
                "unknown style '{}', expected 'agents' or 'participants'",
                other
            )),
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StylePreset::Agents => f.write_str("agents"),
            StylePreset::Participants => f.write_str("participants"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub agent_label: String,
    pub resource_label: String,
    /// Decimal places for shares and utilities
    pub precision: usize,
}

impl TableStyle {
    pub fn agents() -> Self {
        TableStyle {
            agent_label: "Agent".to_string(),
            resource_label: "Resource".to_string(),
            precision: 8,
        }
    }

    pub fn participants() -> Self {
        TableStyle {
            agent_label: "Participant".to_string(),
            resource_label: "Item".to_string(),
            precision: 4,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle::agents()
    }
}

/// Summary line plus a bordered table with one row per agent.
pub fn render_report(allocation: &Allocation, style: &TableStyle) -> String {
    let precision = style.precision;

    let mut headers = vec![style.agent_label.clone()];
    headers.extend(
        (1..=allocation.num_resources()).map(|j| format!("{} {}", style.resource_label, j)),
    );
    headers.push("Total Utility".to_string());

    let rows: Vec<Vec<String>> = (0..allocation.num_agents())
        .map(|agent| {
            let mut row = vec![format!("{} {}", style.agent_label, agent + 1)];
            row.extend(
                allocation
                    .shares_of(agent)
                    .iter()
                    .map(|share| format!("{:.*}", precision, share)),
            );
            row.push(format!("{:.*}", precision, allocation.utility(agent)));
            row
        })
        .collect();

    format!(
        "Egalitarian allocation computed with minimum utility value: {:.*}\nAllocation Table:\n{}",
        precision,
        allocation.min_utility(),
        render_table(&headers, &rows),
    )
}

fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            std::iter::once(&headers[col])
                .chain(rows.iter().map(|row| &row[col]))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|width| "-".repeat(width + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let line = |cells: &[String]| {
        format!(
            "|{}|",
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!(" {:^width$} ", cell, width = width))
                .collect::<Vec<_>>()
                .join("|")
        )
    };

    let mut lines = vec![border.clone(), line(headers), border.clone()];
    lines.extend(rows.iter().map(|row| line(row)));
    lines.push(border);
    lines.join("\n")
}

/// Bracketed, right-aligned rendering of a valuation matrix
pub fn render_matrix(rows: &[Vec<f64>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|value| value.to_string()).collect())
        .collect();
    let width = cells.iter().flatten().map(String::len).max().unwrap_or(0);

    let lines: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let body = row
                .iter()
                .map(|cell| format!("{:>width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" ");
            let open = if i == 0 { "[[" } else { " [" };
            format!("{}{}]", open, body)
        })
        .collect();

    if lines.is_empty() {
        "[]".to_string()
    } else {
        format!("{}]", lines.join("\n"))
    }
}
