use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pulsechat::collaborators::{Collaborators, DashboardAnalyzer, FileProcessor, FileAnalysis};
use pulsechat::config::{Config, LatencyConfig, RouterConfig};
use pulsechat::dashboard::DashboardData;
use pulsechat::orchestrator::{SendOrchestrator, SendOutcome, SENT_FILES_PLACEHOLDER};
use pulsechat::router::SERVICE_UNAVAILABLE;
use pulsechat::session::{Attachment, Role, SessionStore};

/// Analyzer that records the questions it was asked and returns a canned
/// response.
struct RecordingAnalyzer {
    questions: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl DashboardAnalyzer for RecordingAnalyzer {
    async fn analyze(
        &self,
        _dashboard: &DashboardData,
        user_question: &str,
    ) -> pulsechat::error::Result<String> {
        self.questions.lock().unwrap().push(user_question.to_string());
        Ok("Here is your trend analysis.".to_string())
    }
}

/// Analyzer that sleeps longer than the configured handler timeout.
struct SlowAnalyzer;

#[async_trait]
impl DashboardAnalyzer for SlowAnalyzer {
    async fn analyze(
        &self,
        _dashboard: &DashboardData,
        _user_question: &str,
    ) -> pulsechat::error::Result<String> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }
}

/// File processor that always fails.
struct BrokenFileProcessor;

#[async_trait]
impl FileProcessor for BrokenFileProcessor {
    async fn process(
        &self,
        _attachment: &Attachment,
        _dashboard: Option<&DashboardData>,
    ) -> pulsechat::error::Result<FileAnalysis> {
        anyhow::bail!("file backend unavailable")
    }
}

fn instant_config() -> Config {
    Config {
        latency: LatencyConfig {
            per_char_ms: 0,
            min_ms: 0,
            max_ms: 0,
        },
        router: RouterConfig {
            handler_timeout_secs: 1,
            fallback_seed: Some(11),
        },
        dashboard: Some(DashboardData {
            total_revenue: Some("$45,231".to_string()),
            total_users: Some("2,350".to_string()),
            ..Default::default()
        }),
        ..Config::default()
    }
}

fn build(collaborators: Collaborators) -> SendOrchestrator {
    let store = Arc::new(Mutex::new(SessionStore::new()));
    SendOrchestrator::new(store, collaborators, &instant_config())
}

fn message_count(orchestrator: &SendOrchestrator) -> usize {
    orchestrator
        .store()
        .lock()
        .unwrap()
        .current_session()
        .messages
        .len()
}

#[tokio::test]
async fn test_exchange_appends_user_then_assistant() {
    let orchestrator = build(Collaborators::demo());
    let before = message_count(&orchestrator);

    let outcome = orchestrator.send("what's my revenue?").await.unwrap();

    let SendOutcome::Completed(response) = outcome else {
        panic!("expected completed exchange");
    };
    assert!(response.contains("$45,231"));
    assert_eq!(message_count(&orchestrator), before + 2);

    let store = orchestrator.store().lock().unwrap();
    let messages = &store.current_session().messages;
    assert_eq!(messages[messages.len() - 2].role, Role::User);
    assert_eq!(messages[messages.len() - 1].role, Role::Assistant);
    assert_eq!(messages[messages.len() - 1].content, response);
}

#[tokio::test]
async fn test_rejected_sends_leave_session_untouched() {
    let orchestrator = build(Collaborators::demo());
    let before = message_count(&orchestrator);

    let outcome = orchestrator.send("   \n  ").await.unwrap();
    assert_eq!(outcome, SendOutcome::EmptyInput);
    assert_eq!(message_count(&orchestrator), before);
}

#[tokio::test]
async fn test_analyzer_receives_original_casing() {
    let questions = Arc::new(Mutex::new(Vec::new()));
    let collaborators = Collaborators {
        analyzer: Arc::new(RecordingAnalyzer {
            questions: Arc::clone(&questions),
        }),
        ..Collaborators::demo()
    };
    let orchestrator = build(collaborators);

    orchestrator.send("Show me revenue TRENDS").await.unwrap();

    let recorded = questions.lock().unwrap();
    assert_eq!(recorded.as_slice(), ["Show me revenue TRENDS"]);
}

#[tokio::test]
async fn test_timed_out_handler_still_completes_the_exchange() {
    let collaborators = Collaborators {
        analyzer: Arc::new(SlowAnalyzer),
        ..Collaborators::demo()
    };
    let orchestrator = build(collaborators);
    let before = message_count(&orchestrator);

    let outcome = orchestrator.send("analyze my dashboard").await.unwrap();

    // The handler timeout degrades the response but the exchange is still
    // recorded as a normal user/assistant pair.
    let SendOutcome::Completed(response) = outcome else {
        panic!("expected completed exchange");
    };
    assert_eq!(response, SERVICE_UNAVAILABLE);
    assert_eq!(message_count(&orchestrator), before + 2);
    assert!(!orchestrator.is_busy());
}

#[tokio::test]
async fn test_attachment_only_send_records_placeholder_message() {
    let orchestrator = build(Collaborators::demo());
    orchestrator
        .stage_bytes("metrics.png", "image/png", &[0u8; 64])
        .await
        .unwrap();

    let outcome = orchestrator.send("").await.unwrap();
    assert!(matches!(outcome, SendOutcome::Completed(_)));
    assert_eq!(orchestrator.pending_attachments().await, 0);

    let store = orchestrator.store().lock().unwrap();
    let messages = &store.current_session().messages;
    let user = &messages[messages.len() - 2];
    assert_eq!(user.content, SENT_FILES_PLACEHOLDER);
    assert_eq!(user.attachments.len(), 1);
    assert_eq!(user.attachments[0].name, "metrics.png");
}

#[tokio::test]
async fn test_broken_file_processor_degrades_to_demo_analysis() {
    let collaborators = Collaborators {
        files: Arc::new(BrokenFileProcessor),
        ..Collaborators::demo()
    };
    let orchestrator = build(collaborators);
    orchestrator
        .stage_bytes("report.pdf", "application/pdf", &[0u8; 16])
        .await
        .unwrap();

    let outcome = orchestrator.send("what does this say").await.unwrap();
    let SendOutcome::Completed(response) = outcome else {
        panic!("expected completed exchange");
    };
    assert!(response.contains("report.pdf"));
    assert_ne!(response, SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_oversized_attachment_is_rejected_before_send() {
    let mut config = instant_config();
    config.attachments.max_size_bytes = 8;
    let store = Arc::new(Mutex::new(SessionStore::new()));
    let orchestrator = SendOrchestrator::new(store, Collaborators::demo(), &config);

    let error = orchestrator
        .stage_bytes("huge.bin", "application/octet-stream", &[0u8; 9])
        .await
        .unwrap_err();
    assert!(error.to_string().contains("huge.bin"));
    assert_eq!(orchestrator.pending_attachments().await, 0);

    // A boundary-sized attachment is accepted.
    orchestrator
        .stage_bytes("fits.bin", "application/octet-stream", &[0u8; 8])
        .await
        .unwrap();
    assert_eq!(orchestrator.pending_attachments().await, 1);
}

#[tokio::test]
async fn test_session_title_and_export_after_exchanges() {
    let orchestrator = build(Collaborators::demo());
    orchestrator.send("hello assistant").await.unwrap();
    orchestrator.send("any alerts today?").await.unwrap();

    let store = orchestrator.store().lock().unwrap();
    let session = store.current_session();
    assert!(session.title.starts_with("hello assistant"));

    let json = store.export_session(session.id).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["title"], session.title.as_str());
    // Welcome message plus two exchanges
    assert_eq!(parsed["messages"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_sessions_survive_switching_while_sending() {
    let orchestrator = build(Collaborators::demo());
    orchestrator.send("first session message").await.unwrap();

    let second = {
        let mut store = orchestrator.store().lock().unwrap();
        store.create_session()
    };

    orchestrator.send("second session message").await.unwrap();

    let store = orchestrator.store().lock().unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.current_session_id(), second);
    // The first session kept its exchange.
    let first = store
        .sessions()
        .iter()
        .find(|s| s.id != second)
        .unwrap();
    assert!(first
        .messages
        .iter()
        .any(|m| m.content == "first session message"));
}
