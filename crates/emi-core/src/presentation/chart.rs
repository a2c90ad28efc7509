//! Principal-vs-interest doughnut chart adapter.
//!
//! Owns the single chart dataset a calculator view displays. The first render
//! creates it; every later render replaces it outright.

use serde::Serialize;

use crate::loan::PaymentBreakdown;
use crate::presentation::format::{format_indian, CURRENCY_SYMBOL};
use crate::types::Money;

pub const PRINCIPAL_LABEL: &str = "Principal Amount";
pub const INTEREST_LABEL: &str = "Total Interest";

const PRINCIPAL_COLOR: &str = "#667eea";
const INTEREST_COLOR: &str = "#764ba2";
const BORDER_COLOR: &str = "#ffffff";
const BORDER_WIDTH: u32 = 2;

/// Tooltip amounts keep up to three decimals.
const TOOLTIP_FRACTION_DIGITS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Bottom,
}

/// Everything a chart renderer needs to draw the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub kind: ChartKind,
    pub labels: [&'static str; 2],
    pub values: [Money; 2],
    pub background_colors: [&'static str; 2],
    pub border_color: &'static str,
    pub border_width: u32,
    pub legend_position: LegendPosition,
}

impl ChartDataset {
    pub fn from_breakdown(breakdown: &PaymentBreakdown) -> Self {
        ChartDataset {
            kind: ChartKind::Doughnut,
            labels: [PRINCIPAL_LABEL, INTEREST_LABEL],
            values: [breakdown.principal, breakdown.total_interest],
            background_colors: [PRINCIPAL_COLOR, INTEREST_COLOR],
            border_color: BORDER_COLOR,
            border_width: BORDER_WIDTH,
            legend_position: LegendPosition::Bottom,
        }
    }

    pub fn total(&self) -> Money {
        self.values.iter().sum()
    }

    /// Tooltip text for slice `index`: `₹ 5,00,000 (48.0%)`.
    pub fn tooltip_label(&self, index: usize) -> Option<String> {
        let value = *self.values.get(index)?;
        let total = self.total();
        let pct = if total != 0.0 { value / total * 100.0 } else { 0.0 };
        Some(format!(
            "{CURRENCY_SYMBOL} {} ({pct:.1}%)",
            format_indian(value, TOOLTIP_FRACTION_DIGITS)
        ))
    }
}

/// Holds at most one live chart and counts how often it was (re)built.
#[derive(Debug, Default)]
pub struct PaymentChart {
    current: Option<ChartDataset>,
    generation: u64,
}

impl PaymentChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the chart on first use, replace it afterwards.
    pub fn render(&mut self, breakdown: &PaymentBreakdown) -> &ChartDataset {
        self.generation += 1;
        self.current.insert(ChartDataset::from_breakdown(breakdown))
    }

    /// Drop the live chart, if any.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ChartDataset> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
