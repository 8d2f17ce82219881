// CLI commands for working with practices
use anyhow::{bail, Context, Result};
use practice_common::types::Identifier;
use practice_session::error::SessionError;
use practice_session::markup;
use practice_session::{Backend, CatalogLoader, Controller, HttpBackend, Session, SessionEvent};
use std::fs;
use std::io::{self, Read};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::terminal::{self, Picker, TerminalSurface};

/// Load the catalog into a fresh session
async fn load_session(backend: &HttpBackend) -> Result<Session> {
    let catalog = CatalogLoader::load(backend).await?;
    let mut session = Session::new();
    session.on_catalog_loaded(Ok(catalog));
    Ok(session)
}

/// Select `id`, refusing ids the catalog does not have
fn select(session: &mut Session, id: &str) -> Result<()> {
    let id = Identifier::new(id);
    let known = session
        .catalog()
        .catalog()
        .is_some_and(|catalog| catalog.find(&id).is_some());
    if !known {
        bail!("Practice '{}' not found in the catalog", id);
    }
    session.on_select(&id)?;
    Ok(())
}

fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut code = String::new();
        io::stdin()
            .read_to_string(&mut code)
            .context("Failed to read source from stdin")?;
        return Ok(code);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read source file {}", path))
}

/// Print every practice id and title
pub async fn list_practices(backend: &HttpBackend) -> Result<()> {
    let catalog = CatalogLoader::load(backend).await?;

    if catalog.is_empty() {
        println!("No practices available");
        return Ok(());
    }

    for practice in catalog.entries() {
        println!("{}\t{}", practice.id, practice.title);
    }
    Ok(())
}

/// Print one practice as text or as an HTML fragment
pub async fn show_practice(backend: &HttpBackend, id: &str, html: bool, answers: bool) -> Result<()> {
    let mut session = load_session(backend).await?;
    select(&mut session, id)?;

    let view = session.view().context("No practice selected")?;
    if html {
        print!("{}", markup::fragment(&view, answers));
    } else {
        print!("{}", terminal::format_view(&view, answers));
    }
    Ok(())
}

/// Submit a source file for practice `id` and print the verdicts
pub async fn submit_solution(backend: &HttpBackend, id: &str, file: &str) -> Result<()> {
    let code = read_source(file)?;

    let mut session = load_session(backend).await?;
    select(&mut session, id)?;
    session.set_code(code);

    let submission = session.submit().context("Nothing selected to submit")?;
    println!("🚀 Submitting to practice {}...", submission.practice_id());

    let results = backend
        .judge(&submission.request)
        .await
        .map_err(|source| SessionError::SubmissionFailure {
            submission: submission.id,
            practice: submission.practice_id().clone(),
            source,
        })?;
    let passed = results.passed();
    let total = results.len();

    session.on_judge_response(&submission, Ok(results));
    let view = session.view().context("No practice selected")?;
    print!("{}", terminal::format_results(&view.results));

    if passed == total {
        println!("✅ All {} testcase(s) passed", total);
    } else {
        println!("❌ {}/{} testcase(s) passed", passed, total);
    }
    Ok(())
}

const HELP: &str = "Commands:
  select <id>      switch practice
  code <path>      load your solution from a file
  submit           send the loaded code to the judge
  answers on|off   show or hide reference answers
  help             this text
  quit             leave (waits for pending submissions)";

/// Turn prompt lines into session events
async fn read_commands(events: mpsc::Sender<SessionEvent>, picker: Picker) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let argument = parts.next().map(str::trim).unwrap_or_default();

        let event = match (command, argument) {
            ("", _) => continue,
            ("quit" | "exit", _) => break,
            ("help", _) => {
                println!("{}", HELP);
                continue;
            }
            ("select", id) if !id.is_empty() => {
                let id = Identifier::new(id);
                let offered = picker
                    .lock()
                    .map(|entries| entries.iter().any(|e| e.id == id))
                    .unwrap_or(false);
                if !offered {
                    println!("Unknown practice '{}'", id);
                    continue;
                }
                SessionEvent::Select(id)
            }
            ("code", path) if !path.is_empty() => match read_source(path) {
                Ok(code) => {
                    println!("Loaded {} bytes from {}", code.len(), path);
                    SessionEvent::EditCode(code)
                }
                Err(e) => {
                    println!("{:#}", e);
                    continue;
                }
            },
            ("submit", _) => SessionEvent::Submit,
            ("answers", "on") => SessionEvent::ShowAnswers(true),
            ("answers", "off") => SessionEvent::ShowAnswers(false),
            _ => {
                println!("{}", HELP);
                continue;
            }
        };

        if events.send(event).await.is_err() {
            break;
        }
    }

    Ok(())
}

/// Run the interactive session until `quit` or end of input
pub async fn interactive(backend: Arc<HttpBackend>) -> Result<()> {
    let (events_tx, events_rx) = mpsc::channel(32);
    let picker = Picker::default();
    let mut surface = TerminalSurface::new(Arc::clone(&picker));

    println!("{}", HELP);
    let input = tokio::spawn(read_commands(events_tx, picker));

    let session = Controller::new(backend).run(events_rx, &mut surface).await;
    input.await.context("Prompt task failed")??;

    if !session.catalog().is_loaded() {
        bail!("Catalog could not be loaded, see the log for details");
    }
    Ok(())
}
