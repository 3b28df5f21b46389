//! Human-readable console report
//!
//! Peak and postprandial values above the highlight threshold are marked with
//! `***` (the usual 7.8 mmol/L postprandial cut-off by default).

use crate::meal::MealMetrics;
use crate::summary::{Analysis, SummaryStats};
use crate::units::Glucose;

const RECORD_RULE: &str = "--------------------------------------------------";
const SUMMARY_RULE: &str = "==================================================";

/// Console report formatter
#[derive(Debug)]
pub struct TextReport {
    highlight_threshold: f64,
}

impl TextReport {
    pub fn new(highlight_threshold: f64) -> Self {
        Self {
            highlight_threshold,
        }
    }

    fn glucose(value: Option<Glucose>) -> String {
        match value {
            Some(g) => format!("{:.1} mmol/L ({:.0} mg/dL)", g.mmol_l, g.mg_dl),
            None => "N/A".to_string(),
        }
    }

    fn highlighted(&self, value: Option<Glucose>) -> String {
        match value {
            Some(g) if g.mmol_l > self.highlight_threshold => {
                format!("{} ***", Self::glucose(value))
            }
            _ => Self::glucose(value),
        }
    }

    fn signed(value: Option<Glucose>) -> String {
        match value {
            Some(g) => format!("{:+.1} mmol/L ({:+.0} mg/dL)", g.mmol_l, g.mg_dl),
            None => "N/A".to_string(),
        }
    }

    /// Format a single meal block
    pub fn format_record(&self, record: &MealMetrics) -> String {
        format!(
            "Time: {}\nNote: {}\nInitial Glucose: {}\nPeak (2h): {}\nPostprandial (2h): {}\nDelta: {}\n{}\n",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.note,
            Self::glucose(record.initial),
            self.highlighted(record.peak),
            self.highlighted(record.postprandial),
            Self::signed(record.delta),
            RECORD_RULE,
        )
    }

    /// Format the summary statistics block
    pub fn format_summary(&self, summary: &SummaryStats) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nSUMMARY STATISTICS\n{}\n", SUMMARY_RULE));
        out.push_str(&format!(
            "Average Fasting Glucose: {}\n",
            Self::glucose(summary.avg_fasting)
        ));
        out.push_str(&format!(
            "Average Overnight Glucose: {}\n",
            Self::glucose(summary.avg_overnight)
        ));
        out.push_str(&format!(
            "Average Peak Glucose: {}\n",
            Self::glucose(summary.avg_peak)
        ));
        out.push_str(&format!(
            "Average Postprandial Glucose: {}\n",
            Self::glucose(summary.avg_postprandial)
        ));
        out.push_str(SUMMARY_RULE);
        out.push('\n');
        out
    }

    /// Format every record followed by the summary
    pub fn format_analysis(&self, analysis: &Analysis) -> String {
        let mut out: String = analysis
            .records
            .iter()
            .map(|r| self.format_record(r))
            .collect();
        out.push_str(&self.format_summary(&analysis.summary));
        out
    }
}
