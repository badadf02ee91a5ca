//! Read-only catalog and history commands.

use super::{fail, print_json};
use rd_service::ReviewDesk;

pub fn show(desk: &ReviewDesk, lang: &str) -> anyhow::Result<()> {
    match desk.catalog(lang) {
        Ok(view) => print_json(&view),
        Err(e) => fail(e),
    }
}

pub fn history(desk: &ReviewDesk, limit: usize) -> anyhow::Result<()> {
    match desk.history(limit) {
        Ok(records) => print_json(&records),
        Err(e) => fail(e),
    }
}
