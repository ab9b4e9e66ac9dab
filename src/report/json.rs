use super::ProjectReport;
use crate::error::Result;
use crate::report_helpers;

pub fn print_json(report: &ProjectReport) -> Result<()> {
    report_helpers::print_json_stdout(report)
}
