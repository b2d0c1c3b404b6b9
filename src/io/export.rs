use std::io::Write;

use crate::application::{AppError, MonthlyReport};
use crate::domain::format_amount;

/// Exporter for writing a monthly report in machine-readable formats
pub struct ReportExporter<'a> {
    report: &'a MonthlyReport,
}

impl<'a> ReportExporter<'a> {
    pub fn new(report: &'a MonthlyReport) -> Self {
        Self { report }
    }

    /// Export the report entries to CSV, one row per transaction in group order.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "date",
            "wallet",
            "type",
            "amount",
            "currency",
            "description",
        ])?;

        let mut count = 0;
        for group in &self.report.groups {
            for entry in &group.entries {
                let tx = &entry.transaction;
                csv_writer.write_record([
                    tx.date.format("%Y-%m-%d").to_string(),
                    entry.wallet_name.clone(),
                    tx.kind.to_string(),
                    format_amount(tx.amount),
                    entry.currency.clone(),
                    tx.description.clone(),
                ])?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full report as pretty JSON
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self.report)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
