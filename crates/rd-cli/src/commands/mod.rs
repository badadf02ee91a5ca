//! Command handlers. Each prints JSON on stdout.

pub mod admin;
pub mod catalog;
pub mod review;

use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print `{error}` with the caller-facing message and fail the process.
pub(crate) fn fail(err: rd_service::ServiceError) -> anyhow::Result<()> {
    tracing::error!("{err}");
    print_json(&serde_json::json!({ "error": err.public_message() }))?;
    anyhow::bail!(err.public_message())
}
