use anyhow::{Context, Result};
use getnote_pipeline::{HtmdConverter, NoteConverter, RawNote};
use std::path::Path;
use std::sync::Arc;

/// Convert one exported HTML file and print the resulting document
pub async fn execute(file: &Path) -> Result<()> {
    let html = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    // Name the note the way it would appear inside an export archive.
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let raw = RawNote::new(format!("notes/{file_name}"), html);

    let note = NoteConverter::new(Arc::new(HtmdConverter::new()))
        .convert(&raw)
        .with_context(|| format!("Failed to convert {}", file.display()))?;

    print!("{}", note.render());
    Ok(())
}
