// crates/portal-client/src/api/admin.rs
// Settings-page admin actions

use crate::config::BackendFlavor;
use crate::controller::Mutation;
use crate::error::{PortalError, Result};
use std::fmt;
use std::str::FromStr;

/// Reset/seed endpoints.
///
/// The two backends never agreed on names, so every variant keeps the
/// path it is served under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResetEndpoint {
    ResetHistory,
    FullReset,
    LoadInitialData,
    ResetStudyProgress,
    ResetData,
}

const PYTHON_ENDPOINTS: &[ResetEndpoint] = &[ResetEndpoint::ResetHistory, ResetEndpoint::FullReset];

const AWS_ENDPOINTS: &[ResetEndpoint] = &[
    ResetEndpoint::LoadInitialData,
    ResetEndpoint::ResetStudyProgress,
    ResetEndpoint::ResetData,
];

impl ResetEndpoint {
    pub const ALL: [ResetEndpoint; 5] = [
        ResetEndpoint::ResetHistory,
        ResetEndpoint::FullReset,
        ResetEndpoint::LoadInitialData,
        ResetEndpoint::ResetStudyProgress,
        ResetEndpoint::ResetData,
    ];

    pub fn path(self) -> &'static str {
        match self {
            ResetEndpoint::ResetHistory => "/reset_history",
            ResetEndpoint::FullReset => "/full_reset",
            ResetEndpoint::LoadInitialData => "/load_initial_data",
            ResetEndpoint::ResetStudyProgress => "/reset_study_progress",
            ResetEndpoint::ResetData => "/reset_data",
        }
    }

    pub fn name(self) -> &'static str {
        self.path().trim_start_matches('/')
    }

    /// Seeding is additive; everything else wipes data
    pub fn is_destructive(self) -> bool {
        !matches!(self, ResetEndpoint::LoadInitialData)
    }

    /// Endpoints a given backend actually serves
    pub fn offered_by(flavor: BackendFlavor) -> &'static [ResetEndpoint] {
        match flavor {
            BackendFlavor::Python => PYTHON_ENDPOINTS,
            BackendFlavor::Aws => AWS_ENDPOINTS,
        }
    }

    pub fn confirm_prompt(self) -> &'static str {
        match self {
            ResetEndpoint::ResetHistory => {
                "This will delete all study sessions and word review items."
            }
            ResetEndpoint::FullReset => {
                "This will delete all data and restore the initial seed data."
            }
            ResetEndpoint::LoadInitialData => "This will load the initial vocabulary data.",
            ResetEndpoint::ResetStudyProgress => {
                "Are you sure you want to reset your study progress?"
            }
            ResetEndpoint::ResetData => "Are you sure you want to reset your data?",
        }
    }

    /// Notification text when the backend reply carries no message
    pub fn success_message(self) -> &'static str {
        match self {
            ResetEndpoint::ResetHistory => "Study history has been reset",
            ResetEndpoint::FullReset => "System has been fully reset",
            ResetEndpoint::LoadInitialData => "Initial data has been loaded",
            ResetEndpoint::ResetStudyProgress => "Study progress has been reset",
            ResetEndpoint::ResetData => "Data has been reset",
        }
    }
}

impl fmt::Display for ResetEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResetEndpoint {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().trim_start_matches('/').replace('-', "_");
        ResetEndpoint::ALL
            .into_iter()
            .find(|e| e.name() == wanted)
            .ok_or_else(|| PortalError::InvalidInput(format!("unknown reset endpoint: {s}")))
    }
}

/// Route shown after any admin action
pub const AFTER_RESET_ROUTE: &str = "/dashboard";

/// Reset and seed actions take no body
pub fn reset(endpoint: ResetEndpoint) -> Mutation {
    Mutation::post(endpoint.path(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_kept_verbatim() {
        let paths: Vec<_> = ResetEndpoint::ALL.iter().map(|e| e.path()).collect();
        assert_eq!(
            paths,
            [
                "/reset_history",
                "/full_reset",
                "/load_initial_data",
                "/reset_study_progress",
                "/reset_data"
            ]
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("full_reset".parse::<ResetEndpoint>().ok(), Some(ResetEndpoint::FullReset));
        assert_eq!(
            "/reset-study-progress".parse::<ResetEndpoint>().ok(),
            Some(ResetEndpoint::ResetStudyProgress)
        );
        assert!("drop_tables".parse::<ResetEndpoint>().is_err());
    }

    #[test]
    fn test_flavor_sets_disjoint() {
        let python = ResetEndpoint::offered_by(BackendFlavor::Python);
        let aws = ResetEndpoint::offered_by(BackendFlavor::Aws);
        assert!(python.iter().all(|e| !aws.contains(e)));
        assert_eq!(python.len() + aws.len(), ResetEndpoint::ALL.len());
    }

    #[test]
    fn test_reset_posts_without_body() {
        let m = reset(ResetEndpoint::ResetData);
        assert_eq!(m.path, "/reset_data");
        assert!(m.payload.is_none());
    }

    #[test]
    fn test_seeding_not_destructive() {
        assert!(!ResetEndpoint::LoadInitialData.is_destructive());
        assert!(ResetEndpoint::FullReset.is_destructive());
    }
}
