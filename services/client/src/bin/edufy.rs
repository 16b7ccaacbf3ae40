//! services/client/src/bin/edufy.rs
//!
//! The interactive terminal shell. All session behavior lives in the
//! library; this binary only wires the pieces together and renders the two
//! views.

use client_lib::{
    adapters::HttpStudyService,
    config::Config,
    error::AppError,
    session::{
        cache::ArtifactView,
        deck::DeckCursor,
        spawn_connectivity_poller, spawn_status_poller, ActiveView, QueryDisplay,
        SessionController,
    },
};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Connecting to {}", config.service_url);

    // --- 2. Initialize the Service Adapter and Session Controller ---
    let service = Arc::new(HttpStudyService::new(
        config.service_url.clone(),
        config.request_timeout,
    )?);
    let controller = Arc::new(SessionController::new(service));

    // --- 3. Start the Pollers (stopped on shutdown via the token) ---
    let shutdown = CancellationToken::new();
    let status_poller = spawn_status_poller(
        controller.clone(),
        config.status_poll_interval,
        shutdown.clone(),
    );
    let connectivity_poller = spawn_connectivity_poller(
        controller.clone(),
        config.connectivity_poll_interval,
        shutdown.clone(),
    );

    // --- 4. Run the Command Loop ---
    println!("Edufy study companion. Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut cursor = DeckCursor::new();
    let mut deck_version = 0u64;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "help" => print_help(),
            "status" => render_status(&controller).await,
            "upload" => upload(&controller, rest).await,
            "ask" => {
                ask(&controller, rest).await;
            }
            "questions" => {
                controller.activate_view(ActiveView::Asking).await;
                controller.ensure_sample_questions().await;
                render_sample_questions(&controller).await;
            }
            "pick" => pick(&controller, rest).await,
            "cards" => {
                controller.activate_view(ActiveView::Flashcards).await;
                render_card(&controller, &mut cursor, &mut deck_version).await;
            }
            "next" | "prev" | "flip" => {
                if controller.active_view().await != ActiveView::Flashcards {
                    println!("Open the flashcards view first (type 'cards').");
                    continue;
                }
                if let ArtifactView::Ready(deck) = controller.flashcards().await {
                    match command {
                        "next" => cursor.next(deck.len()),
                        "prev" => cursor.previous(deck.len()),
                        _ => cursor.flip(),
                    }
                }
                render_card(&controller, &mut cursor, &mut deck_version).await;
            }
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    // --- 5. Tear Down ---
    shutdown.cancel();
    let _ = status_poller.await;
    let _ = connectivity_poller.await;
    info!("Goodbye.");
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  upload <path>     upload a PDF/TXT document (replaces the previous one)");
    println!("  ask <question>    ask a question about the uploaded document");
    println!("  questions         show suggested questions for the document");
    println!("  pick <n>          ask suggested question number n");
    println!("  cards             open the flashcards view");
    println!("  next / prev / flip  navigate the flashcards");
    println!("  status            show the session and connection state");
    println!("  quit              exit");
}

async fn render_status(controller: &SessionController) {
    if !controller.backend_reachable().await {
        println!("! Backend connection lost. Is the service running?");
    }
    let session = controller.session().await;
    if session.ready {
        println!(
            "Document session ready (version {}, {} document(s)):",
            session.version, session.document_count
        );
        for doc in &session.documents {
            println!("  {} ({})", doc.name, format_size(doc.size));
        }
    } else {
        println!("No documents uploaded yet.");
    }
}

async fn upload(controller: &SessionController, path: &str) {
    if path.is_empty() {
        println!("Usage: upload <path>");
        return;
    }
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("Could not read {}: {}", path, e);
            return;
        }
    };
    let filename = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    println!("Uploading and processing your document...");
    match controller.upload(&filename, bytes).await {
        Ok(receipt) => {
            println!("{}", receipt.message);
            println!(
                "  File: {}  Size: {}",
                receipt.filename,
                format_size(receipt.file_size)
            );
            println!("  Previous documents have been completely removed.");
            println!("  New smart questions and flashcards will be generated.");
        }
        Err(e) => println!("Upload failed: {}", e),
    }
}

async fn ask(controller: &SessionController, question: &str) {
    if let Err(e) = controller.ask(question).await {
        println!("{}", e);
        return;
    }
    match controller.query_display().await {
        QueryDisplay::Answered(result) => {
            println!("AI Response:\n{}\n", result.ai_response);
            if !result.answers.is_empty() {
                println!("Source passages ({}):", result.answers.len());
                for passage in &result.answers {
                    println!("  [{}] {}", passage.source, passage.content);
                }
            }
            if !result.metadata.query_type.is_empty() {
                println!(
                    "({} search, k={}, {} sections)",
                    result.metadata.query_type,
                    result.metadata.k_used,
                    result.metadata.total_sections
                );
            }
        }
        QueryDisplay::NoMatches { .. } => {
            println!("No relevant information found. Try rephrasing your question.");
        }
        QueryDisplay::Failed { notice } => println!("{}", notice),
        QueryDisplay::NotAsked | QueryDisplay::Loading { .. } => {}
    }
}

async fn render_sample_questions(controller: &SessionController) {
    match controller.sample_questions().await {
        ArtifactView::Empty => {
            let session = controller.session().await;
            if session.ready {
                println!("Suggested questions are not ready yet; try again shortly.");
            } else {
                println!("Upload a document first to see suggested questions about it!");
            }
        }
        ArtifactView::Loading => println!("Analyzing your document..."),
        ArtifactView::Ready(questions) if questions.is_empty() => {
            println!("No specific questions could be generated from your document.");
        }
        ArtifactView::Ready(questions) => {
            println!("Smart questions from your document:");
            for (i, question) in questions.iter().enumerate() {
                println!("  {}. \"{}\"", i + 1, question);
            }
            println!("Type 'pick <n>' to ask one of them.");
        }
        ArtifactView::Failed(message) => {
            println!("Could not generate questions: {}", message);
        }
    }
}

async fn pick(controller: &SessionController, number: &str) {
    let questions = match controller.sample_questions().await {
        ArtifactView::Ready(questions) if !questions.is_empty() => questions,
        _ => {
            println!("No suggested questions available; type 'questions' first.");
            return;
        }
    };
    let index = match number.parse::<usize>() {
        Ok(n) if n >= 1 && n <= questions.len() => n - 1,
        _ => {
            println!("Pick a number between 1 and {}.", questions.len());
            return;
        }
    };
    controller.select_sample_question(&questions[index]).await;
    // The asking view consumes the seed exactly once.
    if let Some(question) = controller.take_pending_question().await {
        println!("Asking: {}", question);
        ask(controller, &question).await;
    }
}

async fn render_card(
    controller: &SessionController,
    cursor: &mut DeckCursor,
    deck_version: &mut u64,
) {
    let session = controller.session().await;
    if session.version != *deck_version {
        cursor.reset();
        *deck_version = session.version;
    }
    match controller.flashcards().await {
        ArtifactView::Empty if !session.ready => {
            println!("Please upload a document first to generate flashcards.");
        }
        ArtifactView::Empty | ArtifactView::Loading => {
            println!("Generating flashcards from your document...");
        }
        ArtifactView::Ready(deck) if deck.is_empty() => {
            println!("No flashcards could be generated from the current document.");
        }
        ArtifactView::Ready(deck) => {
            let card = &deck[cursor.index() % deck.len()];
            println!("Card {} of {}", cursor.index() % deck.len() + 1, deck.len());
            if cursor.revealed() {
                println!("  Answer: {}", card.answer);
                println!("  (flip to see the question, next/prev to move on)");
            } else {
                println!("  Question: {}", card.question);
                println!("  (flip to reveal the answer, next/prev to move on)");
            }
        }
        ArtifactView::Failed(message) => {
            println!("Flashcard generation failed: {}. Re-open 'cards' to retry.", message);
        }
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}
