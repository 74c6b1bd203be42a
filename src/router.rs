//! Intent routing for free-text user input
//!
//! User text is classified against an ordered, first-match-wins rule set and
//! dispatched to a domain handler. The order of the cascade is a contract:
//! dashboard analysis, then files, alerts, reports, personnel, workflows,
//! then the greeting cascade, and finally a randomized fallback. Matching is
//! case-insensitive substring matching; the original casing is preserved for
//! echoing in responses.
//!
//! Handlers run under a per-route timeout, and any failure at any step is
//! converted into a single fixed degraded-service message. The router never
//! propagates an error to its caller.

use crate::collaborators::Collaborators;
use crate::config::RouterConfig;
use crate::dashboard::{self, DashboardData};
use crate::error::{PulsechatError, Result};
use crate::session::Attachment;
use chrono::Timelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed message substituted when any handler fails or times out
pub const SERVICE_UNAVAILABLE: &str = "Sorry, the AI service is temporarily unavailable. \
Please try again in a moment.";

/// Fixed message when alert generation reports nothing
pub const ALL_SYSTEMS_NORMAL: &str = "Good news - all systems are running normally. \
No alerts or warnings right now.";

/// Static capabilities message for file keywords with nothing attached
pub const FILE_CAPABILITIES: &str = "You can attach files or images to any message and \
I'll analyze them - spreadsheets, reports, screenshots of charts, you name it. \
Drop one in and ask away.";

/// Number of mock team members generated for personnel questions
const PERSONNEL_SAMPLE_SIZE: usize = 8;

/// Keywords for the dashboard-analysis branch
pub const DASHBOARD_KEYWORDS: &[&str] = &["analyz", "dashboard", "trend", "insight"];
/// Keywords for the file branch
pub const FILE_KEYWORDS: &[&str] = &["file", "upload"];
/// Keywords for the alert branch
pub const ALERT_KEYWORDS: &[&str] = &["alert", "notification", "warning"];
/// Keywords for the report branch
pub const REPORT_KEYWORDS: &[&str] = &["report", "summary", "generate"];
/// Keywords for the personnel branch
pub const PERSONNEL_KEYWORDS: &[&str] = &["team", "personnel", "staff", "employee"];
/// Keywords for the workflow branch
pub const WORKFLOW_KEYWORDS: &[&str] = &["workflow", "automat", "process"];

/// One entry of the dispatch table
#[derive(Debug, Clone, Copy)]
pub struct Route {
    /// Route label used in logs and the `routes` CLI command
    pub name: &'static str,
    /// Keywords whose presence (lowercased substring) selects this route
    pub keywords: &'static [&'static str],
    /// Intent selected when this route matches
    pub intent: Intent,
    /// The route only matches when dashboard context is present
    pub requires_dashboard: bool,
    /// The route also matches any input carrying attachments
    pub accepts_attachments: bool,
}

/// The ordered dispatch table for the six domain branches
///
/// Evaluated top to bottom, first match wins. The greeting cascade and the
/// randomized fallback sit below these and catch everything else.
pub const DISPATCH_TABLE: &[Route] = &[
    Route {
        name: "dashboard-analysis",
        keywords: DASHBOARD_KEYWORDS,
        intent: Intent::DashboardAnalysis,
        requires_dashboard: true,
        accepts_attachments: false,
    },
    Route {
        name: "file-analysis",
        keywords: FILE_KEYWORDS,
        intent: Intent::FileAnalysis,
        requires_dashboard: false,
        accepts_attachments: true,
    },
    Route {
        name: "alerts",
        keywords: ALERT_KEYWORDS,
        intent: Intent::Alerts,
        requires_dashboard: false,
        accepts_attachments: false,
    },
    Route {
        name: "reports",
        keywords: REPORT_KEYWORDS,
        intent: Intent::Reports,
        requires_dashboard: false,
        accepts_attachments: false,
    },
    Route {
        name: "personnel",
        keywords: PERSONNEL_KEYWORDS,
        intent: Intent::Personnel,
        requires_dashboard: false,
        accepts_attachments: false,
    },
    Route {
        name: "workflows",
        keywords: WORKFLOW_KEYWORDS,
        intent: Intent::Workflows,
        requires_dashboard: false,
        accepts_attachments: false,
    },
];

/// The ordered greeting cascade evaluated below the domain branches
pub const GREETING_CASCADE: &[(&[&str], Greeting)] = &[
    (&["hello", "hi", "hey"], Greeting::Hello),
    (&["help", "what can you do"], Greeting::Help),
    (&["revenue", "money", "profit"], Greeting::Revenue),
    (&["user", "customer", "audience"], Greeting::Users),
    (&["improve", "optimize", "better"], Greeting::Improve),
    (&["report", "summary", "analysis"], Greeting::Analysis),
];

/// Classified intent for one user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Branch 1: dashboard analysis (requires dashboard data)
    DashboardAnalysis,
    /// Branch 2: file keywords or attachments present
    FileAnalysis,
    /// Branch 3: alerts and warnings
    Alerts,
    /// Branch 4: report templates
    Reports,
    /// Branch 5: personnel analytics
    Personnel,
    /// Branch 6: workflow listing
    Workflows,
    /// Branch 7: one of the fixed greeting responses
    Greeting(Greeting),
    /// Branch 8: randomized personalized fallback
    Fallback,
}

/// The ordered greeting cascade below the domain branches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    /// hello / hi / hey
    Hello,
    /// help / "what can you do"
    Help,
    /// revenue / money / profit
    Revenue,
    /// user / customer / audience
    Users,
    /// improve / optimize / better
    Improve,
    /// report / summary / analysis (secondary catch)
    Analysis,
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Classifies normalized user text against the ordered rule set
///
/// `has_attachments` widens the file branch and `has_dashboard` gates the
/// dashboard-analysis branch. The input must already be lowercased.
///
/// # Examples
///
/// ```
/// use pulsechat::router::{classify, Intent, Greeting};
///
/// assert_eq!(classify("show me revenue trends", false, true), Intent::DashboardAnalysis);
/// assert_eq!(classify("what's my revenue?", false, true), Intent::Greeting(Greeting::Revenue));
/// ```
pub fn classify(text_lower: &str, has_attachments: bool, has_dashboard: bool) -> Intent {
    for route in DISPATCH_TABLE {
        let matched = contains_any(text_lower, route.keywords)
            || (route.accepts_attachments && has_attachments);
        if matched && (!route.requires_dashboard || has_dashboard) {
            return route.intent;
        }
    }

    for (keywords, greeting) in GREETING_CASCADE {
        if contains_any(text_lower, keywords) {
            return Intent::Greeting(*greeting);
        }
    }

    Intent::Fallback
}

/// Routes user input to a domain handler and renders the response
///
/// Holds the collaborator bundle, the per-route timeout, and the seedable
/// RNG used for fallback phrasing.
pub struct IntentRouter {
    collaborators: Collaborators,
    handler_timeout: Duration,
    timeout_secs: u64,
    rng: Mutex<StdRng>,
}

impl IntentRouter {
    /// Creates a router over the given collaborator bundle
    ///
    /// A `fallback_seed` in the config makes fallback phrasing deterministic.
    pub fn new(collaborators: Collaborators, config: &RouterConfig) -> Self {
        let rng = match config.fallback_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            collaborators,
            handler_timeout: Duration::from_secs(config.handler_timeout_secs),
            timeout_secs: config.handler_timeout_secs,
            rng: Mutex::new(rng),
        }
    }

    /// Routes user text to a handler and returns the assistant response
    ///
    /// Never fails: any handler error or timeout is converted into the fixed
    /// degraded-service message.
    pub async fn route(
        &self,
        text: &str,
        attachments: &[Attachment],
        dashboard: Option<&DashboardData>,
    ) -> String {
        let lower = text.to_lowercase();
        let intent = classify(&lower, !attachments.is_empty(), dashboard.is_some());
        debug!(?intent, "Classified user input");

        match self.dispatch(intent, text, attachments, dashboard).await {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "Handler failed, degrading to fixed response");
                SERVICE_UNAVAILABLE.to_string()
            }
        }
    }

    async fn dispatch(
        &self,
        intent: Intent,
        text: &str,
        attachments: &[Attachment],
        dashboard: Option<&DashboardData>,
    ) -> Result<String> {
        match intent {
            Intent::DashboardAnalysis => self.handle_dashboard(text, dashboard).await,
            Intent::FileAnalysis => self.handle_files(attachments, dashboard).await,
            Intent::Alerts => self.handle_alerts(dashboard).await,
            Intent::Reports => self.handle_reports().await,
            Intent::Personnel => self.handle_personnel().await,
            Intent::Workflows => self.handle_workflows().await,
            Intent::Greeting(greeting) => Ok(self.handle_greeting(greeting, dashboard)),
            Intent::Fallback => Ok(self.handle_fallback(dashboard)),
        }
    }

    /// Wraps a collaborator future in the configured per-route timeout
    async fn with_timeout<T>(
        &self,
        handler: &'static str,
        future: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.handler_timeout, future).await {
            Ok(result) => result,
            Err(_) => Err(PulsechatError::HandlerTimeout {
                handler: handler.to_string(),
                timeout_secs: self.timeout_secs,
            }
            .into()),
        }
    }

    async fn handle_dashboard(
        &self,
        text: &str,
        dashboard: Option<&DashboardData>,
    ) -> Result<String> {
        // classify() only selects this branch when dashboard data is present.
        let data = dashboard.ok_or_else(|| {
            PulsechatError::Handler("Dashboard analysis requires dashboard data".to_string())
        })?;
        self.with_timeout(
            "dashboard-analysis",
            self.collaborators.analyzer.analyze(data, text),
        )
        .await
    }

    async fn handle_files(
        &self,
        attachments: &[Attachment],
        dashboard: Option<&DashboardData>,
    ) -> Result<String> {
        let Some(first) = attachments.first() else {
            return Ok(FILE_CAPABILITIES.to_string());
        };

        // Collaborator failures on file analysis degrade to a canned demo
        // response for this branch, not to the global unavailable message.
        match self
            .with_timeout("file-analysis", self.collaborators.files.process(first, dashboard))
            .await
        {
            Ok(analysis) => {
                let mut response = format!(
                    "I looked at **{}** ({}, {} bytes).\n\n{}\n",
                    analysis.file_name, analysis.file_type, analysis.size, analysis.summary
                );
                if !analysis.key_metrics.is_empty() {
                    response.push_str("\nKey metrics:\n");
                    for metric in &analysis.key_metrics {
                        response.push_str(&format!("- {}\n", metric));
                    }
                }
                if !analysis.recommendations.is_empty() {
                    response.push_str("\nRecommendations:\n");
                    for rec in &analysis.recommendations {
                        response.push_str(&format!("- {}\n", rec));
                    }
                }
                Ok(response)
            }
            Err(error) => {
                warn!(%error, "File processor failed, using canned response");
                Ok(format!(
                    "I received your file **{}**. Here's a demo analysis: the content \
                     looks well-formed and consistent with your dashboard data.",
                    first.name
                ))
            }
        }
    }

    async fn handle_alerts(&self, dashboard: Option<&DashboardData>) -> Result<String> {
        let alerts = self
            .with_timeout(
                "alerts",
                self.collaborators.notifications.generate_alerts(dashboard),
            )
            .await?;

        if alerts.is_empty() {
            return Ok(ALL_SYSTEMS_NORMAL.to_string());
        }

        let mut response = format!("You have {} active alert(s):\n", alerts.len());
        for alert in &alerts {
            response.push_str(&format!("\n**{}** - {}\n", alert.title, alert.message));
            for action in &alert.suggested_actions {
                response.push_str(&format!("  - {}\n", action));
            }
        }
        Ok(response)
    }

    async fn handle_reports(&self) -> Result<String> {
        let templates = self
            .with_timeout("reports", self.collaborators.reports.templates())
            .await?;

        let mut response = String::from("Here are the report templates I can generate:\n");
        for template in &templates {
            response.push_str(&format!("- **{}** ({})\n", template.name, template.kind));
        }
        response.push_str("\nTell me which one you'd like and I'll get started.");
        Ok(response)
    }

    async fn handle_personnel(&self) -> Result<String> {
        let users = self
            .with_timeout(
                "personnel",
                self.collaborators
                    .personnel
                    .generate_mock_users(PERSONNEL_SAMPLE_SIZE),
            )
            .await?;
        let analyzed = self
            .with_timeout(
                "personnel",
                self.collaborators.personnel.analyze_behavior(&users),
            )
            .await?;

        if analyzed.is_empty() {
            return Err(
                PulsechatError::Handler("Personnel analysis returned no users".to_string()).into(),
            );
        }

        let average =
            analyzed.iter().map(|u| u.performance_score).sum::<f64>() / analyzed.len() as f64;

        let mut response = String::from("Team performance snapshot - top performers:\n");
        for user in analyzed.iter().take(3) {
            response.push_str(&format!(
                "- **{}**: {:.1} (most active around {})\n",
                user.user_name,
                user.performance_score,
                user.most_active_hours
                    .first()
                    .map(|h| format!("{}:00", h))
                    .unwrap_or_else(|| "n/a".to_string()),
            ));
        }
        response.push_str(&format!(
            "\nAverage score across {} team members: {:.1}",
            analyzed.len(),
            average
        ));
        Ok(response)
    }

    async fn handle_workflows(&self) -> Result<String> {
        let workflows = self
            .with_timeout("workflows", self.collaborators.workflows.workflows())
            .await?;

        let mut response = String::from("Here are your automation workflows:\n");
        for workflow in &workflows {
            response.push_str(&format!("- **{}** [{}]\n", workflow.name, workflow.status));
        }
        Ok(response)
    }

    fn handle_greeting(&self, greeting: Greeting, dashboard: Option<&DashboardData>) -> String {
        let view = dashboard::resolve(dashboard);
        match greeting {
            Greeting::Hello => format!(
                "Hello! Your dashboard is looking healthy today: {} in revenue, {} users, \
                 and {} active projects. What would you like to dig into?",
                view.revenue(),
                view.users(),
                view.projects()
            ),
            Greeting::Help => "I can help you with quite a lot around here: analyzing \
                 dashboard trends, reviewing uploaded files and images, checking alerts, \
                 generating reports, summarizing team performance, and listing automation \
                 workflows. Just ask in plain language."
                .to_string(),
            Greeting::Revenue => format!(
                "Revenue currently stands at {} with a conversion rate of {}. Recent \
                 activity: {}.",
                view.revenue(),
                view.conversion(),
                view.activity()
            ),
            Greeting::Users => format!(
                "You have {} users at the moment, converting at {}. Audience growth has \
                 been steady - ask me to analyze trends for the full picture.",
                view.users(),
                view.conversion()
            ),
            Greeting::Improve => format!(
                "A few places to look for improvement: conversion is at {}, so small funnel \
                 tweaks could move revenue beyond {}. I can also check your {} active \
                 projects for stalled work.",
                view.conversion(),
                view.revenue(),
                view.projects()
            ),
            Greeting::Analysis => format!(
                "I can run an analysis or put together a summary for you. Headline numbers \
                 right now: {} revenue, {} users, {} conversion.",
                view.revenue(),
                view.users(),
                view.conversion()
            ),
        }
    }

    fn handle_fallback(&self, dashboard: Option<&DashboardData>) -> String {
        const VERB_PHRASES: &[&str] = &[
            "I took a quick look at your numbers",
            "I ran a quick pass over your dashboard",
            "I checked your latest metrics",
            "I scanned today's figures",
        ];
        const INSIGHT_PHRASES: &[&str] = &[
            "momentum looks solid across the board",
            "nothing alarming stands out right now",
            "there's room to push conversion a little higher",
            "engagement is trending in the right direction",
        ];

        let view = dashboard::resolve(dashboard);
        let hour = chrono::Local::now().hour();
        let day_greeting = if hour < 12 {
            "Good morning"
        } else if hour < 18 {
            "Good afternoon"
        } else {
            "Good evening"
        };

        let (verb, insight) = {
            let mut rng = self.rng.lock().expect("fallback rng poisoned");
            (
                VERB_PHRASES[rng.random_range(0..VERB_PHRASES.len())],
                INSIGHT_PHRASES[rng.random_range(0..INSIGHT_PHRASES.len())],
            )
        };

        format!(
            "{}! {} - with {} in revenue and {} users, {}. Ask me about trends, reports, \
             alerts, or your team whenever you're ready.",
            day_greeting,
            verb,
            view.revenue(),
            view.users(),
            insight
        )
    }
}

impl std::fmt::Debug for IntentRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRouter")
            .field("handler_timeout", &self.handler_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{
        Alert, DashboardAnalyzer, FileAnalysis, FileProcessor, NotificationManager,
        ReportGenerator, ReportTemplate,
    };
    use crate::session::AttachmentKind;
    use async_trait::async_trait;
    use std::sync::Arc;

    fn demo_router() -> IntentRouter {
        IntentRouter::new(
            Collaborators::demo(),
            &RouterConfig {
                handler_timeout_secs: 5,
                fallback_seed: Some(7),
            },
        )
    }

    fn dashboard() -> DashboardData {
        DashboardData {
            total_revenue: Some("$77,000".to_string()),
            total_users: Some("3,200".to_string()),
            ..Default::default()
        }
    }

    fn attachment() -> Attachment {
        Attachment {
            kind: AttachmentKind::Image,
            url: "data:image/png;base64,AAAA".to_string(),
            name: "chart.png".to_string(),
            size: 4,
        }
    }

    // --- classification precedence -------------------------------------

    #[test]
    fn test_dashboard_keywords_route_to_branch_one_with_data() {
        assert_eq!(
            classify("show me revenue trends", false, true),
            Intent::DashboardAnalysis
        );
        assert_eq!(classify("analyze this please", false, true), Intent::DashboardAnalysis);
        assert_eq!(classify("any insights today?", false, true), Intent::DashboardAnalysis);
    }

    #[test]
    fn test_dashboard_branch_requires_data() {
        // Without dashboard data, "trend" falls through the cascade.
        assert_ne!(classify("show me revenue trends", false, false), Intent::DashboardAnalysis);
    }

    #[test]
    fn test_plain_revenue_question_reaches_greeting_branch() {
        assert_eq!(
            classify("what's my revenue?", false, true),
            Intent::Greeting(Greeting::Revenue)
        );
    }

    #[test]
    fn test_attachments_route_to_file_branch_without_keywords() {
        assert_eq!(classify("what do you make of this?", true, true), Intent::FileAnalysis);
    }

    #[test]
    fn test_file_keywords_route_without_attachments() {
        assert_eq!(classify("can i upload something", false, false), Intent::FileAnalysis);
    }

    #[test]
    fn test_alert_report_personnel_workflow_branches() {
        assert_eq!(classify("any warnings?", false, false), Intent::Alerts);
        assert_eq!(classify("generate something for me", false, false), Intent::Reports);
        assert_eq!(classify("how is the staff doing", false, false), Intent::Personnel);
        assert_eq!(classify("show my workflows", false, false), Intent::Workflows);
    }

    #[test]
    fn test_report_beats_personnel_on_overlap() {
        // "report" (branch 4) wins over "team" (branch 5) by source order.
        assert_eq!(classify("report on the team", false, false), Intent::Reports);
    }

    #[test]
    fn test_dashboard_beats_file_keyword_on_overlap() {
        assert_eq!(
            classify("analyze my uploaded file", false, true),
            Intent::DashboardAnalysis
        );
    }

    #[test]
    fn test_greeting_cascade_order() {
        assert_eq!(classify("hey there", false, false), Intent::Greeting(Greeting::Hello));
        assert_eq!(classify("can you help me", false, false), Intent::Greeting(Greeting::Help));
        assert_eq!(
            classify("how much money are we making", false, false),
            Intent::Greeting(Greeting::Revenue)
        );
        assert_eq!(
            classify("tell me about our customers", false, false),
            Intent::Greeting(Greeting::Users)
        );
        assert_eq!(
            classify("ways to optimize our funnel", false, false),
            Intent::Greeting(Greeting::Improve)
        );
        // Substring matching is deliberate: "this" carries "hi".
        assert_eq!(
            classify("optimize this", false, false),
            Intent::Greeting(Greeting::Hello)
        );
        assert_eq!(
            classify("i want an analysis", false, false),
            Intent::Greeting(Greeting::Analysis)
        );
    }

    #[test]
    fn test_unmatched_input_falls_back() {
        assert_eq!(classify("xyzzy plugh", false, true), Intent::Fallback);
    }

    #[test]
    fn test_dispatch_table_order_is_pinned() {
        let names: Vec<&str> = DISPATCH_TABLE.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "dashboard-analysis",
                "file-analysis",
                "alerts",
                "reports",
                "personnel",
                "workflows"
            ]
        );
    }

    // --- handler behavior ----------------------------------------------

    #[tokio::test]
    async fn test_route_dashboard_analysis_interpolates_data() {
        let router = demo_router();
        let data = dashboard();
        let response = router.route("Show me revenue trends", &[], Some(&data)).await;
        assert!(response.contains("$77,000"));
        assert!(response.contains("Show me revenue trends"));
    }

    #[tokio::test]
    async fn test_route_file_keyword_without_attachment_lists_capabilities() {
        let router = demo_router();
        let response = router.route("can I upload a file?", &[], None).await;
        assert_eq!(response, FILE_CAPABILITIES);
    }

    #[tokio::test]
    async fn test_route_with_attachment_summarizes_file() {
        let router = demo_router();
        let att = attachment();
        let response = router.route("here you go", std::slice::from_ref(&att), None).await;
        assert!(response.contains("chart.png"));
        assert!(response.contains("Key metrics"));
    }

    #[tokio::test]
    async fn test_route_reports_lists_templates() {
        let router = demo_router();
        let response = router.route("show me a report", &[], None).await;
        assert!(response.contains("Weekly Performance Summary"));
    }

    #[tokio::test]
    async fn test_route_personnel_summarizes_top_three() {
        let router = demo_router();
        let response = router.route("how is the team doing", &[], None).await;
        assert!(response.contains("Alex Chen"));
        assert!(response.contains("Average score"));
        // Only the top three are listed.
        assert!(!response.contains("Aisha Bello"));
    }

    #[tokio::test]
    async fn test_route_workflows_lists_workflows() {
        let router = demo_router();
        let response = router.route("what workflows are set up", &[], None).await;
        assert!(response.contains("New user onboarding"));
    }

    #[tokio::test]
    async fn test_fallback_is_deterministic_with_seed() {
        let config = RouterConfig {
            handler_timeout_secs: 5,
            fallback_seed: Some(42),
        };
        let a = IntentRouter::new(Collaborators::demo(), &config);
        let b = IntentRouter::new(Collaborators::demo(), &config);
        let ra = a.route("xyzzy", &[], None).await;
        let rb = b.route("xyzzy", &[], None).await;
        assert_eq!(ra, rb);
    }

    // --- failure degradation -------------------------------------------

    struct FailingAnalyzer;

    #[async_trait]
    impl DashboardAnalyzer for FailingAnalyzer {
        async fn analyze(&self, _: &DashboardData, _: &str) -> Result<String> {
            Err(PulsechatError::Handler("backend down".to_string()).into())
        }
    }

    struct StalledAnalyzer;

    #[async_trait]
    impl DashboardAnalyzer for StalledAnalyzer {
        async fn analyze(&self, _: &DashboardData, _: &str) -> Result<String> {
            std::future::pending::<()>().await;
            unreachable!()
        }
    }

    struct EmptyNotifications;

    #[async_trait]
    impl NotificationManager for EmptyNotifications {
        async fn generate_alerts(&self, _: Option<&DashboardData>) -> Result<Vec<Alert>> {
            Ok(Vec::new())
        }
    }

    struct FailingFiles;

    #[async_trait]
    impl FileProcessor for FailingFiles {
        async fn process(
            &self,
            _: &Attachment,
            _: Option<&DashboardData>,
        ) -> Result<FileAnalysis> {
            Err(PulsechatError::Handler("parser crashed".to_string()).into())
        }
    }

    struct FailingReports;

    #[async_trait]
    impl ReportGenerator for FailingReports {
        async fn templates(&self) -> Result<Vec<ReportTemplate>> {
            Err(PulsechatError::Handler("template store offline".to_string()).into())
        }
    }

    fn with_analyzer(analyzer: Arc<dyn DashboardAnalyzer>) -> Collaborators {
        Collaborators {
            analyzer,
            ..Collaborators::demo()
        }
    }

    #[tokio::test]
    async fn test_failing_handler_degrades_to_unavailable_message() {
        let collaborators = with_analyzer(Arc::new(FailingAnalyzer));
        let router = IntentRouter::new(collaborators, &RouterConfig::default());
        let data = dashboard();
        let response = router.route("analyze this", &[], Some(&data)).await;
        assert_eq!(response, SERVICE_UNAVAILABLE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_handler_times_out_to_unavailable_message() {
        let collaborators = with_analyzer(Arc::new(StalledAnalyzer));
        let router = IntentRouter::new(
            collaborators,
            &RouterConfig {
                handler_timeout_secs: 1,
                fallback_seed: Some(0),
            },
        );
        let data = dashboard();
        let response = router.route("analyze this", &[], Some(&data)).await;
        assert_eq!(response, SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_failing_file_processor_uses_canned_file_response() {
        let collaborators = Collaborators {
            files: Arc::new(FailingFiles),
            ..Collaborators::demo()
        };
        let router = IntentRouter::new(collaborators, &RouterConfig::default());
        let att = attachment();
        let response = router.route("", std::slice::from_ref(&att), None).await;
        assert!(response.contains("chart.png"));
        assert!(response.contains("demo analysis"));
        assert_ne!(response, SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_zero_alerts_yields_all_normal_message() {
        let collaborators = Collaborators {
            notifications: Arc::new(EmptyNotifications),
            ..Collaborators::demo()
        };
        let router = IntentRouter::new(collaborators, &RouterConfig::default());
        let response = router.route("any alerts?", &[], None).await;
        assert_eq!(response, ALL_SYSTEMS_NORMAL);
    }

    #[tokio::test]
    async fn test_failing_reports_degrade_to_unavailable_message() {
        let collaborators = Collaborators {
            reports: Arc::new(FailingReports),
            ..Collaborators::demo()
        };
        let router = IntentRouter::new(collaborators, &RouterConfig::default());
        let response = router.route("give me a report", &[], None).await;
        assert_eq!(response, SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_greeting_uses_defaults_without_dashboard() {
        let router = demo_router();
        let response = router.route("hello", &[], None).await;
        assert!(response.contains(crate::dashboard::DEFAULT_REVENUE));
    }
}
