//! Review generation command.

use super::print_json;
use rd_service::review::ReviewResponse;
use rd_service::ReviewDesk;
use std::io::Read;
use std::path::Path;

pub async fn generate(desk: &ReviewDesk, request: &Path) -> anyhow::Result<()> {
    let body = if request == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(request)?
    };

    let response = desk.review(&body).await;
    print_json(&response)?;
    if let ReviewResponse::Error { error } = response {
        anyhow::bail!(error);
    }
    Ok(())
}
