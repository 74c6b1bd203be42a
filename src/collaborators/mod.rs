//! Collaborator contracts for the intent router
//!
//! The router delegates domain questions to six external analytics services.
//! Only their call/response contracts matter to the engine; each is modeled
//! as an async trait so tests can substitute failing or stalled
//! implementations. The [`demo`] module provides canned implementations used
//! by the CLI.
//!
//! Every collaborator may fail; the router degrades gracefully instead of
//! propagating errors to its caller.

pub mod demo;

use crate::dashboard::DashboardData;
use crate::error::Result;
use crate::session::Attachment;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One alert produced by the notification collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Short alert headline
    pub title: String,
    /// Alert body text
    pub message: String,
    /// Suggested follow-up actions
    pub suggested_actions: Vec<String>,
}

/// One report template known to the report collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTemplate {
    /// Template display name
    pub name: String,
    /// Template kind (e.g. "weekly", "financial")
    pub kind: String,
}

/// Analysis of a single uploaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// Original file name
    pub file_name: String,
    /// MIME-derived classification of the file
    pub file_type: String,
    /// File size in bytes
    pub size: u64,
    /// Narrative summary of the content
    pub summary: String,
    /// Key metrics extracted from the file
    pub key_metrics: Vec<String>,
    /// Recommended follow-ups
    pub recommendations: Vec<String>,
}

/// Behavior profile for one team member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivity {
    /// Display name
    pub user_name: String,
    /// Performance score in the 0-100 range
    pub performance_score: f64,
    /// Hours of day (0-23) with the most activity
    pub most_active_hours: Vec<u8>,
}

/// One workflow known to the workflow collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Workflow display name
    pub name: String,
    /// Current status (e.g. "active", "paused")
    pub status: String,
}

/// Produces a narrative analysis of the dashboard for a user question
#[async_trait]
pub trait DashboardAnalyzer: Send + Sync {
    /// Analyze the dashboard snapshot in the context of a user question
    async fn analyze(&self, dashboard: &DashboardData, user_question: &str) -> Result<String>;
}

/// Derives alerts from the current dashboard state
#[async_trait]
pub trait NotificationManager: Send + Sync {
    /// Generate the current alert list; empty means all systems normal
    async fn generate_alerts(&self, dashboard: Option<&DashboardData>) -> Result<Vec<Alert>>;
}

/// Knows the available report templates
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// List available report templates
    async fn templates(&self) -> Result<Vec<ReportTemplate>>;
}

/// Analyzes a single uploaded attachment
#[async_trait]
pub trait FileProcessor: Send + Sync {
    /// Process one attachment against the dashboard context
    async fn process(
        &self,
        attachment: &Attachment,
        dashboard: Option<&DashboardData>,
    ) -> Result<FileAnalysis>;
}

/// Generates and analyzes personnel activity data
#[async_trait]
pub trait PersonnelAssistant: Send + Sync {
    /// Produce `count` mock team members with activity data
    async fn generate_mock_users(&self, count: usize) -> Result<Vec<UserActivity>>;

    /// Analyze behavior of the given team members
    async fn analyze_behavior(&self, users: &[UserActivity]) -> Result<Vec<UserActivity>>;
}

/// Knows the configured automation workflows
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    /// List configured workflows with their status
    async fn workflows(&self) -> Result<Vec<Workflow>>;
}

/// Bundle of all collaborator handles consumed by the router
///
/// Collaborators are shared handles so a bundle can be cloned into the
/// router while tests keep references for assertions.
#[derive(Clone)]
pub struct Collaborators {
    /// Dashboard analysis collaborator
    pub analyzer: Arc<dyn DashboardAnalyzer>,
    /// Alert collaborator
    pub notifications: Arc<dyn NotificationManager>,
    /// Report template collaborator
    pub reports: Arc<dyn ReportGenerator>,
    /// File analysis collaborator
    pub files: Arc<dyn FileProcessor>,
    /// Personnel analytics collaborator
    pub personnel: Arc<dyn PersonnelAssistant>,
    /// Workflow collaborator
    pub workflows: Arc<dyn WorkflowEngine>,
}

impl Collaborators {
    /// Creates the canned demo bundle used by the CLI
    pub fn demo() -> Self {
        Self {
            analyzer: Arc::new(demo::DemoDashboardAnalyzer),
            notifications: Arc::new(demo::DemoNotificationManager),
            reports: Arc::new(demo::DemoReportGenerator),
            files: Arc::new(demo::DemoFileProcessor),
            personnel: Arc::new(demo::DemoPersonnelAssistant),
            workflows: Arc::new(demo::DemoWorkflowEngine),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
