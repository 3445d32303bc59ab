//! Role-based authorization checks.
//!
//! Handlers that act on other principals' accounts check the caller's role
//! before touching any store:
//!
//! 1. Build the result with [`require_admin`] (or [`require_role`]);
//!    [`require_admin_over`] once the target account is known
//! 2. Log a denial
//! 3. Convert with [`AuthorizationResult::into_result`]

use super::{AuthenticatedUser, DomainError, ErrorCode, Role};

/// Result of an authorization check, with enough context for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    pub granted: bool,
    /// Operation being attempted, e.g. "renew_account".
    pub action: &'static str,
    pub actor: String,
    pub denial_reason: Option<String>,
}

impl AuthorizationResult {
    pub fn granted(action: &'static str, actor: impl Into<String>) -> Self {
        Self {
            granted: true,
            action,
            actor: actor.into(),
            denial_reason: None,
        }
    }

    pub fn denied(action: &'static str, actor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            granted: false,
            action,
            actor: actor.into(),
            denial_reason: Some(reason.into()),
        }
    }

    /// `Forbidden` for a denial. Denials are logged at warn level.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            return Ok(());
        }
        let reason = self
            .denial_reason
            .unwrap_or_else(|| "Access denied".to_string());
        tracing::warn!(action = self.action, actor = %self.actor, reason = %reason, "Authorization denied");
        Err(DomainError::new(ErrorCode::Forbidden, reason).with_detail("action", self.action))
    }
}

/// Grants if the actor holds one of `allowed`.
pub fn require_role(
    actor: &AuthenticatedUser,
    allowed: &[Role],
    action: &'static str,
) -> AuthorizationResult {
    if allowed.contains(&actor.role) {
        AuthorizationResult::granted(action, actor.username.clone())
    } else {
        AuthorizationResult::denied(
            action,
            actor.username.clone(),
            format!("Role {} may not perform {}", actor.role, action),
        )
    }
}

/// Grants ADMIN and COLLEGE_ADMIN.
pub fn require_admin(actor: &AuthenticatedUser, action: &'static str) -> AuthorizationResult {
    require_role(actor, &[Role::Admin, Role::CollegeAdmin], action)
}

/// Grants ADMIN over any account, and COLLEGE_ADMIN over subscribers of
/// its own college only.
pub fn require_admin_over(
    actor: &AuthenticatedUser,
    target_role: Role,
    target_college: Option<&str>,
    action: &'static str,
) -> AuthorizationResult {
    match actor.role {
        Role::Admin => AuthorizationResult::granted(action, actor.username.clone()),
        Role::CollegeAdmin => {
            if target_role != Role::Subscriber {
                return AuthorizationResult::denied(
                    action,
                    actor.username.clone(),
                    format!("College admins may not manage {} accounts", target_role),
                );
            }
            match (actor.college_id.as_deref(), target_college) {
                (Some(own), Some(target)) if own == target => {
                    AuthorizationResult::granted(action, actor.username.clone())
                }
                _ => AuthorizationResult::denied(
                    action,
                    actor.username.clone(),
                    "Account belongs to another college",
                ),
            }
        }
        _ => require_admin(actor, action),
    }
}

/// College an admin's reporting is limited to: `None` for ADMIN (platform
/// wide), the own college for COLLEGE_ADMIN.
///
/// # Errors
///
/// `Forbidden` for non-admins and for a COLLEGE_ADMIN without a college.
pub fn admin_college_scope<'a>(
    actor: &'a AuthenticatedUser,
    action: &'static str,
) -> Result<Option<&'a str>, DomainError> {
    require_admin(actor, action).into_result()?;
    match actor.role {
        Role::Admin => Ok(None),
        _ => match actor.college_id.as_deref() {
            Some(college) => Ok(Some(college)),
            None => AuthorizationResult::denied(
                action,
                actor.username.clone(),
                "College admin has no college assigned",
            )
            .into_result()
            .map(|()| None),
        },
    }
}
