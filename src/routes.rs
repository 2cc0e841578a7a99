//! Role-gated navigation.
//!
//! A pure function from (target view, session) to an allow/redirect
//! decision. Authorization failures never surface as errors — an empty
//! session redirects to login, a role mismatch redirects to that role's
//! own dashboard.

use crate::models::Role;
use crate::session::ActiveSession;

/// Top-level views of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The root path — pure dispatcher, never rendered itself.
    Root,
    Login,
    Register,
    PatientDashboard,
    Assessment,
    DoctorDashboard,
}

impl View {
    /// The role a view requires, if it is protected.
    fn required_role(self) -> Option<Role> {
        match self {
            Self::PatientDashboard | Self::Assessment => Some(Role::Patient),
            Self::DoctorDashboard => Some(Role::Doctor),
            Self::Root | Self::Login | Self::Register => None,
        }
    }
}

/// The outcome of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(View),
}

/// The landing view for an authenticated role.
pub fn home_view(role: Role) -> View {
    match role {
        Role::Patient => View::PatientDashboard,
        Role::Doctor => View::DoctorDashboard,
    }
}

/// Decide whether `view` is reachable under `session`.
///
/// Total over every view/role combination; the session type makes a
/// partially-populated or unknown-role session unrepresentable, so an
/// unauthenticated session is the only "unrecognized" case.
pub fn guard(view: View, session: Option<&ActiveSession>) -> RouteDecision {
    // Root dispatches rather than renders.
    if view == View::Root {
        return match session {
            Some(s) => RouteDecision::Redirect(home_view(s.role)),
            None => RouteDecision::Redirect(View::Login),
        };
    }

    match (view.required_role(), session) {
        (None, _) => RouteDecision::Allow,
        (Some(_), None) => RouteDecision::Redirect(View::Login),
        (Some(required), Some(s)) if s.role == required => RouteDecision::Allow,
        (Some(_), Some(s)) => RouteDecision::Redirect(home_view(s.role)),
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DoctorProfile, PatientProfile, Principal};

    fn patient_session() -> ActiveSession {
        ActiveSession {
            token: "tok".into(),
            principal: Principal::Patient(PatientProfile {
                patient_id: "p-1".into(),
                first_name: "Ada".into(),
                last_name: "Okafor".into(),
                email: "ada@example.com".into(),
            }),
            role: Role::Patient,
        }
    }

    fn doctor_session() -> ActiveSession {
        ActiveSession {
            token: "tok".into(),
            principal: Principal::Doctor(DoctorProfile {
                doctor_id: "d-1".into(),
                first_name: "Grace".into(),
                last_name: "Lin".into(),
                specialization: "General Medicine".into(),
            }),
            role: Role::Doctor,
        }
    }

    const PROTECTED: &[View] = &[
        View::PatientDashboard,
        View::Assessment,
        View::DoctorDashboard,
    ];

    #[test]
    fn empty_session_redirects_all_protected_views_to_login() {
        for &view in PROTECTED {
            assert_eq!(
                guard(view, None),
                RouteDecision::Redirect(View::Login),
                "{view:?}"
            );
        }
    }

    #[test]
    fn matching_role_is_allowed() {
        let patient = patient_session();
        assert_eq!(guard(View::PatientDashboard, Some(&patient)), RouteDecision::Allow);
        assert_eq!(guard(View::Assessment, Some(&patient)), RouteDecision::Allow);

        let doctor = doctor_session();
        assert_eq!(guard(View::DoctorDashboard, Some(&doctor)), RouteDecision::Allow);
    }

    #[test]
    fn role_mismatch_redirects_to_own_dashboard() {
        let patient = patient_session();
        assert_eq!(
            guard(View::DoctorDashboard, Some(&patient)),
            RouteDecision::Redirect(View::PatientDashboard)
        );

        let doctor = doctor_session();
        assert_eq!(
            guard(View::PatientDashboard, Some(&doctor)),
            RouteDecision::Redirect(View::DoctorDashboard)
        );
        assert_eq!(
            guard(View::Assessment, Some(&doctor)),
            RouteDecision::Redirect(View::DoctorDashboard)
        );
    }

    #[test]
    fn root_dispatches_by_session() {
        assert_eq!(guard(View::Root, None), RouteDecision::Redirect(View::Login));
        assert_eq!(
            guard(View::Root, Some(&patient_session())),
            RouteDecision::Redirect(View::PatientDashboard)
        );
        assert_eq!(
            guard(View::Root, Some(&doctor_session())),
            RouteDecision::Redirect(View::DoctorDashboard)
        );
    }

    #[test]
    fn public_views_are_always_reachable() {
        let patient = patient_session();
        let doctor = doctor_session();
        for session in [None, Some(&patient), Some(&doctor)] {
            assert_eq!(guard(View::Login, session), RouteDecision::Allow);
            assert_eq!(guard(View::Register, session), RouteDecision::Allow);
        }
    }

    #[test]
    fn home_view_maps_roles() {
        assert_eq!(home_view(Role::Patient), View::PatientDashboard);
        assert_eq!(home_view(Role::Doctor), View::DoctorDashboard);
    }
}
