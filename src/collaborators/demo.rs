//! Canned collaborator implementations
//!
//! These stand in for the six analytics services so the CLI and tests run
//! without any external dependency. Content is deterministic mock data.

use super::{
    Alert, DashboardAnalyzer, FileAnalysis, FileProcessor, NotificationManager,
    PersonnelAssistant, ReportGenerator, ReportTemplate, UserActivity, Workflow, WorkflowEngine,
};
use crate::dashboard::DashboardData;
use crate::error::Result;
use crate::session::{Attachment, AttachmentKind};
use async_trait::async_trait;

/// Demo dashboard analyzer producing a canned narrative
pub struct DemoDashboardAnalyzer;

#[async_trait]
impl DashboardAnalyzer for DemoDashboardAnalyzer {
    async fn analyze(&self, dashboard: &DashboardData, user_question: &str) -> Result<String> {
        Ok(format!(
            "Looking at your dashboard for \"{}\": revenue stands at {} across {} users, \
             with {} active projects converting at {}. Recent activity shows {}.",
            user_question,
            dashboard.revenue(),
            dashboard.users(),
            dashboard.projects(),
            dashboard.conversion(),
            dashboard.activity(),
        ))
    }
}

/// Demo notification manager with a small fixed alert set
pub struct DemoNotificationManager;

#[async_trait]
impl NotificationManager for DemoNotificationManager {
    async fn generate_alerts(&self, _dashboard: Option<&DashboardData>) -> Result<Vec<Alert>> {
        Ok(vec![
            Alert {
                title: "Conversion dip".to_string(),
                message: "Conversion rate dropped 0.4% week over week.".to_string(),
                suggested_actions: vec![
                    "Review the checkout funnel".to_string(),
                    "Compare against last month's campaign".to_string(),
                ],
            },
            Alert {
                title: "Storage nearing quota".to_string(),
                message: "Project storage is at 85% of the plan limit.".to_string(),
                suggested_actions: vec!["Archive stale projects".to_string()],
            },
        ])
    }
}

/// Demo report generator with a fixed template list
pub struct DemoReportGenerator;

#[async_trait]
impl ReportGenerator for DemoReportGenerator {
    async fn templates(&self) -> Result<Vec<ReportTemplate>> {
        Ok(vec![
            ReportTemplate {
                name: "Weekly Performance Summary".to_string(),
                kind: "weekly".to_string(),
            },
            ReportTemplate {
                name: "Monthly Financial Report".to_string(),
                kind: "financial".to_string(),
            },
            ReportTemplate {
                name: "User Growth Analysis".to_string(),
                kind: "growth".to_string(),
            },
            ReportTemplate {
                name: "Project Status Overview".to_string(),
                kind: "projects".to_string(),
            },
        ])
    }
}

/// Demo file processor that summarizes attachment metadata
pub struct DemoFileProcessor;

#[async_trait]
impl FileProcessor for DemoFileProcessor {
    async fn process(
        &self,
        attachment: &Attachment,
        dashboard: Option<&DashboardData>,
    ) -> Result<FileAnalysis> {
        let file_type = match attachment.kind {
            AttachmentKind::Image => "image",
            AttachmentKind::File => "document",
        };
        let context = dashboard
            .map(|d| format!(" against revenue of {}", d.revenue()))
            .unwrap_or_default();
        Ok(FileAnalysis {
            file_name: attachment.name.clone(),
            file_type: file_type.to_string(),
            size: attachment.size,
            summary: format!(
                "Processed {} ({} bytes){}. Content looks consistent with your \
                 current dashboard figures.",
                attachment.name, attachment.size, context
            ),
            key_metrics: vec![
                "3 trend lines detected".to_string(),
                "No anomalies above 2 sigma".to_string(),
            ],
            recommendations: vec![
                "Share with the analytics channel".to_string(),
                "Schedule a follow-up report".to_string(),
            ],
        })
    }
}

/// Demo personnel assistant with a fixed roster
pub struct DemoPersonnelAssistant;

const DEMO_ROSTER: &[(&str, f64)] = &[
    ("Alex Chen", 92.5),
    ("Priya Sharma", 88.0),
    ("Marcus Webb", 84.5),
    ("Sofia Reyes", 81.0),
    ("Tom Okafor", 77.5),
    ("Lena Fischer", 74.0),
    ("Daniel Kim", 70.5),
    ("Aisha Bello", 67.0),
];

#[async_trait]
impl PersonnelAssistant for DemoPersonnelAssistant {
    async fn generate_mock_users(&self, count: usize) -> Result<Vec<UserActivity>> {
        Ok(DEMO_ROSTER
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, (name, score))| UserActivity {
                user_name: (*name).to_string(),
                performance_score: *score,
                most_active_hours: vec![9 + (i as u8 % 3), 14, 16],
            })
            .collect())
    }

    async fn analyze_behavior(&self, users: &[UserActivity]) -> Result<Vec<UserActivity>> {
        let mut analyzed = users.to_vec();
        analyzed.sort_by(|a, b| {
            b.performance_score
                .partial_cmp(&a.performance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(analyzed)
    }
}

/// Demo workflow engine with a fixed workflow list
pub struct DemoWorkflowEngine;

#[async_trait]
impl WorkflowEngine for DemoWorkflowEngine {
    async fn workflows(&self) -> Result<Vec<Workflow>> {
        Ok(vec![
            Workflow {
                name: "New user onboarding".to_string(),
                status: "active".to_string(),
            },
            Workflow {
                name: "Weekly report delivery".to_string(),
                status: "active".to_string(),
            },
            Workflow {
                name: "Churn-risk outreach".to_string(),
                status: "paused".to_string(),
            },
        ])
    }
}
