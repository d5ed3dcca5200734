//! Derive store rows from the JSON content files

use anyhow::Result;

use crate::store::{sync, ContentStore};
use crate::Folio;

pub async fn run(folio: &Folio) -> Result<()> {
    let store = ContentStore::open(&folio.db_path).await?;
    let report = sync::sync_from_json(&store, &folio.content()).await?;

    println!(
        "Synced {} quotes, {} essays, {} releases, {} sections into {}",
        report.quotes,
        report.essays,
        report.music,
        report.sections,
        folio.db_path.display()
    );

    Ok(())
}
