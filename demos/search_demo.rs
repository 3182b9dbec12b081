/// Findex walkthrough
///
/// Demonstrates the full engine surface:
/// - indexing documents with statuses and ratings
/// - plus/minus word queries, sequential and parallel
/// - per-document matching
/// - the duplicate sweep and the request window
use findex::core::engine::SearchEngine;
use findex::core::types::{DocumentId, DocumentStatus};
use findex::index::dedup::remove_duplicates;
use findex::search::requests::RequestQueue;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building the index...");
    let mut engine = SearchEngine::with_stop_words_text("and in on the")?;

    engine.add_document(
        DocumentId(1),
        "curly cat curly tail",
        DocumentStatus::Actual,
        &[7, 2, 7],
    )?;
    engine.add_document(
        DocumentId(2),
        "curly dog and fancy collar",
        DocumentStatus::Actual,
        &[1, 2, 3],
    )?;
    engine.add_document(
        DocumentId(3),
        "big cat fancy collar",
        DocumentStatus::Actual,
        &[1, 2, 8],
    )?;
    engine.add_document(
        DocumentId(4),
        "big dog sparrow Eugene",
        DocumentStatus::Actual,
        &[1, 3, 2],
    )?;
    engine.add_document(
        DocumentId(5),
        "big dog sparrow Vasiliy",
        DocumentStatus::Actual,
        &[1, 1, 1],
    )?;
    println!("  {} documents indexed\n", engine.document_count());

    println!("Searching 'curly -collar':");
    for doc in engine.find_top_documents("curly -collar")? {
        println!("  {}", doc);
    }

    println!("\nSame query through the parallel path:");
    for doc in engine.find_top_documents_par("curly -collar")? {
        println!("  {}", doc);
    }

    println!("\nMatching 'big dog -Eugene' against document 4:");
    let (words, status) = engine.match_document("big dog -Eugene", DocumentId(4))?;
    println!("  matched {:?}, status ordinal {}", words, status.ordinal());

    println!("\nAdding a duplicate of document 4 and sweeping:");
    engine.add_document(
        DocumentId(6),
        "sparrow dog big Eugene big",
        DocumentStatus::Actual,
        &[1, 3, 2],
    )?;
    let mut sink = std::io::stdout();
    remove_duplicates(&mut engine, &mut sink)?;
    println!("  {} documents remain", engine.document_count());

    println!("\nRequest window:");
    let mut queue = RequestQueue::new(&engine);
    queue.add_find_request("nothing matches this")?;
    queue.add_find_request("curly")?;
    println!("  {} request(s) found nothing", queue.no_result_requests());

    Ok(())
}
