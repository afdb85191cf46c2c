use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use theodore::config::InterviewConfig;
use theodore::interview::{InterviewEngine, InterviewSession, TurnOutcome};
use theodore::llm::{create_provider, LlmConfig};
use theodore::store::{InterviewStore, LibSqlBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = InterviewConfig::from_env().context("Failed to read configuration")?;

    eprintln!("🤖 Theodore — AI Hiring Assistant v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {} ({})", config.model, config.ollama_url);
    eprintln!("   Database: {}", config.db_path);
    eprintln!("   Commands: /restart, /summary, /quit\n");

    let store: Arc<dyn InterviewStore> = Arc::new(
        LibSqlBackend::new_local(std::path::Path::new(&config.db_path))
            .await
            .with_context(|| format!("Failed to open database at {}", config.db_path))?,
    );

    let llm_config = LlmConfig {
        base_url: config.ollama_url.clone(),
        model: config.model.clone(),
        request_timeout: config.request_timeout,
    };
    let llm = create_provider(&llm_config).context("Failed to create LLM provider")?;

    let engine = InterviewEngine::new(Arc::clone(&store), llm, config.question_count);
    let mut session = InterviewSession::new();

    // Greeting is the first transcript turn
    if let Some(turn) = session.transcript.turns().first() {
        println!("\n{}\n", turn.content);
    }

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break; // EOF
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        match line.as_str() {
            "/quit" => break,
            "/restart" => {
                session.reset();
                if let Some(turn) = session.transcript.turns().first() {
                    println!("\n{}\n", turn.content);
                }
                continue;
            }
            "/summary" => {
                print_summary(store.as_ref(), &session).await;
                continue;
            }
            _ => {}
        }

        match engine.handle_input(&mut session, &line).await {
            Ok(TurnOutcome::Reply(text)) | Ok(TurnOutcome::Closed(text)) => {
                println!("\n{text}\n");
            }
            Ok(TurnOutcome::Rejected(e)) => {
                eprintln!("⚠️  {e}");
            }
            Ok(TurnOutcome::Ignored) => {
                eprintln!("The interview has concluded. Type /restart to begin again.");
            }
            Err(e) => {
                eprintln!("❌ {e}");
            }
        }
    }

    Ok(())
}

/// Print the persisted records for the current interview, if any.
async fn print_summary(store: &dyn InterviewStore, session: &InterviewSession) {
    let Some(id) = session.profile_id else {
        eprintln!("No profile has been persisted yet.");
        return;
    };

    match store.get_profile(id).await {
        Ok(Some(stored)) => {
            let p = &stored.profile;
            println!("\nInterview {}", stored.id);
            println!("  Name:       {}", p.name);
            println!("  Phone:      {}", p.phone_number);
            println!("  Email:      {}", p.email_address);
            println!("  Location:   {}", p.location);
            println!("  Role:       {}", p.role);
            println!("  Experience: {} years", p.experience_years);
            println!("  Stack:      {}", p.tech_stack);
        }
        Ok(None) => {
            eprintln!("Profile {id} not found in the database.");
            return;
        }
        Err(e) => {
            eprintln!("❌ {e}");
            return;
        }
    }

    match store.list_technical_responses(id).await {
        Ok(responses) => {
            for r in responses {
                println!("  Q{}: {}", r.ordinal, r.question);
                println!("      {}", r.answer);
            }
            println!();
        }
        Err(e) => eprintln!("❌ {e}"),
    }
}
