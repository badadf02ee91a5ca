//! Catalog administration commands.

use super::{fail, print_json};
use rd_service::ReviewDesk;

pub async fn add_flavor(desk: &ReviewDesk, text: &str, category: &str) -> anyhow::Result<()> {
    match desk.add_flavor(text, category).await {
        Ok(option) => print_json(&option),
        Err(e) => fail(e),
    }
}

pub async fn add_atmosphere(desk: &ReviewDesk, text: &str) -> anyhow::Result<()> {
    match desk.add_atmosphere(text).await {
        Ok(option) => print_json(&option),
        Err(e) => fail(e),
    }
}

pub fn add_server(desk: &ReviewDesk, name: &str) -> anyhow::Result<()> {
    match desk.add_server(name) {
        Ok(server) => print_json(&server),
        Err(e) => fail(e),
    }
}

pub fn delete_flavor(desk: &ReviewDesk, id: i64) -> anyhow::Result<()> {
    desk.delete_flavor(id).or_else(fail)?;
    print_json(&serde_json::json!({ "deleted": id }))
}

pub fn delete_atmosphere(desk: &ReviewDesk, id: i64) -> anyhow::Result<()> {
    desk.delete_atmosphere(id).or_else(fail)?;
    print_json(&serde_json::json!({ "deleted": id }))
}

pub fn delete_server(desk: &ReviewDesk, name: &str) -> anyhow::Result<()> {
    desk.delete_server(name).or_else(fail)?;
    print_json(&serde_json::json!({ "deleted": name }))
}
