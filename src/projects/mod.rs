//! Project listing and detail (`dq projects`, `dq project <id>`).

mod report;

use crate::db::{Store, projects};
use crate::error::Result;
use crate::report_helpers;
use report::{print_detail, print_list};

pub fn run_list(store: &Store, json: bool) -> Result<()> {
    let all = projects::list(store.conn())?;
    if json {
        report_helpers::print_json_stdout(&all)
    } else {
        print_list(&all);
        Ok(())
    }
}

pub fn run_detail(store: &Store, id: i64, json: bool) -> Result<()> {
    let detail = projects::detail(store.conn(), id)?;
    if json {
        report_helpers::print_json_stdout(&detail)
    } else {
        print_detail(&detail);
        Ok(())
    }
}
