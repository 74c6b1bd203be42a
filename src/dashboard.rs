//! Dashboard context consumed by response templates
//!
//! The hosting page supplies a read-only snapshot of pre-formatted display
//! strings. Every field is optional; templates fall back to literal defaults
//! when a field (or the whole snapshot) is absent.

use serde::{Deserialize, Serialize};

/// Literal default used when revenue data is absent
pub const DEFAULT_REVENUE: &str = "$45,231";
/// Literal default used when user count data is absent
pub const DEFAULT_USERS: &str = "2,350";
/// Literal default used when project data is absent
pub const DEFAULT_PROJECTS: &str = "12";
/// Literal default used when conversion data is absent
pub const DEFAULT_CONVERSION: &str = "3.2%";
/// Literal default used when recent activity data is absent
pub const DEFAULT_ACTIVITY: &str = "steady traffic across all channels";

/// Read-only dashboard snapshot supplied by the hosting page
///
/// All values are pre-formatted display strings; the engine never parses
/// or recomputes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardData {
    /// Total revenue, e.g. "$128,430"
    #[serde(default)]
    pub total_revenue: Option<String>,

    /// Total user count, e.g. "4,512"
    #[serde(default)]
    pub total_users: Option<String>,

    /// Number of active projects, e.g. "18"
    #[serde(default)]
    pub active_projects: Option<String>,

    /// Conversion rate, e.g. "4.7%"
    #[serde(default)]
    pub conversion_rate: Option<String>,

    /// One-line description of recent activity
    #[serde(default)]
    pub recent_activity: Option<String>,
}

impl DashboardData {
    /// Revenue display string, or the literal default
    pub fn revenue(&self) -> &str {
        self.total_revenue.as_deref().unwrap_or(DEFAULT_REVENUE)
    }

    /// User count display string, or the literal default
    pub fn users(&self) -> &str {
        self.total_users.as_deref().unwrap_or(DEFAULT_USERS)
    }

    /// Active project display string, or the literal default
    pub fn projects(&self) -> &str {
        self.active_projects.as_deref().unwrap_or(DEFAULT_PROJECTS)
    }

    /// Conversion rate display string, or the literal default
    pub fn conversion(&self) -> &str {
        self.conversion_rate.as_deref().unwrap_or(DEFAULT_CONVERSION)
    }

    /// Recent activity display string, or the literal default
    pub fn activity(&self) -> &str {
        self.recent_activity.as_deref().unwrap_or(DEFAULT_ACTIVITY)
    }
}

/// Resolve a possibly-absent snapshot to template values
///
/// `None` behaves exactly like a snapshot with every field absent.
pub fn resolve(dashboard: Option<&DashboardData>) -> DashboardView<'_> {
    DashboardView { data: dashboard }
}

/// Borrowed view over an optional snapshot with default fallbacks applied
#[derive(Debug, Clone, Copy)]
pub struct DashboardView<'a> {
    data: Option<&'a DashboardData>,
}

impl DashboardView<'_> {
    /// Revenue display string, or the literal default
    pub fn revenue(&self) -> &str {
        self.data.map(|d| d.revenue()).unwrap_or(DEFAULT_REVENUE)
    }

    /// User count display string, or the literal default
    pub fn users(&self) -> &str {
        self.data.map(|d| d.users()).unwrap_or(DEFAULT_USERS)
    }

    /// Active project display string, or the literal default
    pub fn projects(&self) -> &str {
        self.data.map(|d| d.projects()).unwrap_or(DEFAULT_PROJECTS)
    }

    /// Conversion rate display string, or the literal default
    pub fn conversion(&self) -> &str {
        self.data
            .map(|d| d.conversion())
            .unwrap_or(DEFAULT_CONVERSION)
    }

    /// Recent activity display string, or the literal default
    pub fn activity(&self) -> &str {
        self.data.map(|d| d.activity()).unwrap_or(DEFAULT_ACTIVITY)
    }
}
