//! Interactive chat mode handler.
//!
//! Instantiates the demo collaborators and the send orchestrator, then runs
//! a readline-based interactive loop that submits user input to the
//! assistant. Slash commands manage sessions and attachments without going
//! through the assistant.

use crate::commands::special_commands::{
    parse_special_command, print_help, SpecialCommand,
};
use crate::config::Config;
use crate::collaborators::Collaborators;
use crate::dashboard;
use crate::error::Result;
use crate::orchestrator::{SendOrchestrator, SendOutcome};
use crate::session::SessionStore;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::{Arc, Mutex};

/// Start interactive chat mode
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
///
/// # Errors
///
/// Returns an error if the readline editor cannot be created or if the
/// session store rejects an operation.
pub async fn run_chat(config: Config) -> Result<()> {
    tracing::info!("Starting interactive chat mode");

    let store = Arc::new(Mutex::new(SessionStore::new()));
    let dashboard = config.dashboard.clone();
    let orchestrator = SendOrchestrator::new(Arc::clone(&store), Collaborators::demo(), &config);

    let mut rl = DefaultEditor::new()?;

    print_welcome_banner(&store);

    loop {
        let pending = orchestrator.pending_attachments().await;
        let prompt = if pending > 0 {
            format!("{} ", format!("[{} attached] >", pending).cyan())
        } else {
            "> ".to_string()
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() && pending == 0 {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                // Check for special commands first
                match parse_special_command(trimmed) {
                    Ok(SpecialCommand::NewSession) => {
                        let mut store = store.lock().expect("session store poisoned");
                        store.create_session();
                        println!("{}\n", "Started a new chat session".green());
                        continue;
                    }
                    Ok(SpecialCommand::ListSessions) => {
                        print_session_list(&store);
                        continue;
                    }
                    Ok(SpecialCommand::SwitchSession(position)) => {
                        let mut store = store.lock().expect("session store poisoned");
                        match store.sessions().get(position - 1).map(|s| s.id) {
                            Some(id) => {
                                store.select_session(id);
                                println!(
                                    "{}\n",
                                    format!("Switched to \"{}\"", store.current_session().title)
                                        .green()
                                );
                            }
                            None => {
                                println!(
                                    "{}\n",
                                    format!("No session at position {}", position).yellow()
                                );
                            }
                        }
                        continue;
                    }
                    Ok(SpecialCommand::RenameSession(title)) => {
                        let mut store = store.lock().expect("session store poisoned");
                        let id = store.current_session_id();
                        store.rename_session(id, &title);
                        println!(
                            "{}\n",
                            format!("Session is now \"{}\"", store.current_session().title)
                                .green()
                        );
                        continue;
                    }
                    Ok(SpecialCommand::DeleteSession) => {
                        let mut store = store.lock().expect("session store poisoned");
                        let id = store.current_session_id();
                        store.delete_session(id);
                        println!(
                            "{}\n",
                            format!(
                                "Deleted. Now in \"{}\"",
                                store.current_session().title
                            )
                            .green()
                        );
                        continue;
                    }
                    Ok(SpecialCommand::ExportSession(path)) => {
                        let json = {
                            let store = store.lock().expect("session store poisoned");
                            store.export_session(store.current_session_id())?
                        };
                        match path {
                            Some(path) => {
                                std::fs::write(&path, &json)?;
                                println!(
                                    "{}\n",
                                    format!("Exported session to {}", path.display()).green()
                                );
                            }
                            None => println!("{}\n", json),
                        }
                        continue;
                    }
                    Ok(SpecialCommand::Attach(paths)) => {
                        let errors = orchestrator.stage_files(&paths).await;
                        for error in &errors {
                            println!("{}", error.to_string().yellow());
                        }
                        let staged = orchestrator.pending_attachments().await;
                        println!(
                            "{}\n",
                            format!("{} attachment(s) staged for the next message", staged)
                                .green()
                        );
                        continue;
                    }
                    Ok(SpecialCommand::ShowData) => {
                        print_dashboard_context(dashboard.as_ref());
                        continue;
                    }
                    Ok(SpecialCommand::Help) => {
                        print_help();
                        println!();
                        continue;
                    }
                    Ok(SpecialCommand::Exit) => break,
                    Ok(SpecialCommand::None) => {
                        // Regular assistant message
                    }
                    Err(error) => {
                        println!("{}\n", error.to_string().yellow());
                        continue;
                    }
                }

                println!("{}", "Thinking...".dimmed());
                match orchestrator.send(trimmed).await? {
                    SendOutcome::Completed(response) => {
                        println!("{} {}\n", "Assistant:".blue().bold(), response);
                    }
                    SendOutcome::EmptyInput => continue,
                    SendOutcome::Busy => {
                        println!(
                            "{}\n",
                            "Still working on the previous message, hang on".yellow()
                        );
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(error) => {
                tracing::error!("Readline error: {}", error);
                break;
            }
        }
    }

    println!("{}", "Goodbye!".green());
    Ok(())
}

fn print_welcome_banner(store: &Arc<Mutex<SessionStore>>) {
    println!("{}", "Pulseboard Assistant".blue().bold());
    println!("Type '/help' for commands, 'exit' to quit\n");

    let store = store.lock().expect("session store poisoned");
    if let Some(welcome) = store.current_session().messages.first() {
        println!("{} {}\n", "Assistant:".blue().bold(), welcome.content);
    }
}

fn print_session_list(store: &Arc<Mutex<SessionStore>>) {
    let store = store.lock().expect("session store poisoned");
    let current = store.current_session_id();
    println!("Sessions:");
    for (index, session) in store.sessions().iter().enumerate() {
        let marker = if session.id == current { "*" } else { " " };
        println!(
            "{} {}. {} ({} messages)",
            marker,
            index + 1,
            session.title,
            session.messages.len()
        );
    }
    println!();
}

fn print_dashboard_context(data: Option<&crate::dashboard::DashboardData>) {
    let view = dashboard::resolve(data);
    if data.is_none() {
        println!("{}", "No dashboard context configured; showing defaults".dimmed());
    }
    println!("Dashboard context:");
    println!("  Revenue:         {}", view.revenue());
    println!("  Users:           {}", view.users());
    println!("  Active projects: {}", view.projects());
    println!("  Conversion:      {}", view.conversion());
    println!("  Activity:        {}", view.activity());
    println!();
}
