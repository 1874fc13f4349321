//! `studyagent notes`: maintain and query the note collection.

use std::sync::Arc;
use studyagent_config::AppConfig;
use studyagent_notes::{FileNoteStore, NoteRetriever};

fn retriever(config: &AppConfig) -> Result<NoteRetriever, Box<dyn std::error::Error>> {
    let provider = super::provider(config)?;
    Ok(NoteRetriever::new(
        Arc::new(FileNoteStore::new(&config.notes.path)),
        provider,
        &config.notes.embedding_model,
    ))
}

pub async fn index(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let retriever = retriever(&config)?;
    let embedded = retriever.index().await?;

    println!(
        "Embedded {embedded} note(s) in {}",
        config.notes.path.display()
    );
    Ok(())
}

pub async fn search(config: AppConfig, query: &str, k: usize) -> Result<(), Box<dyn std::error::Error>> {
    let retriever = retriever(&config)?;
    let results = retriever.search(query, k).await?;

    if results.is_empty() {
        println!("No notes found.");
        return Ok(());
    }

    for (i, note) in results.iter().enumerate() {
        println!("[{}] {:.3}  notes:{}", i + 1, note.score, note.id);
        println!("    {}", preview(&note.text, 100));
    }
    Ok(())
}

fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        format!("{}...", flat.chars().take(max).collect::<String>())
    }
}
