//! Coarse client device fingerprinting.
//!
//! A fingerprint is "<Browser> on <OS>" derived from the User-Agent. It is
//! deliberately coarse: it only has to notice a switch between devices,
//! not identify one.

use std::fmt;

/// Client metadata captured at login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceContext {
    pub user_agent: Option<String>,
    pub client_ip: Option<String>,
}

impl DeviceContext {
    pub fn new(user_agent: Option<String>, client_ip: Option<String>) -> Self {
        Self {
            user_agent,
            client_ip,
        }
    }

    pub fn fingerprint(&self) -> DeviceFingerprint {
        DeviceFingerprint::from_user_agent(self.user_agent.as_deref())
    }

    /// Client IP for display, or "unknown".
    pub fn ip_or_unknown(&self) -> &str {
        self.client_ip.as_deref().unwrap_or("unknown")
    }
}

/// Browser/OS classification of a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceFingerprint(String);

const UNKNOWN_DEVICE: &str = "Unknown Device";

impl DeviceFingerprint {
    /// Classifies a User-Agent header. Missing or blank agents map to
    /// "Unknown Device".
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let agent = match user_agent.map(str::trim) {
            Some(agent) if !agent.is_empty() => agent.to_lowercase(),
            _ => return Self(UNKNOWN_DEVICE.to_string()),
        };
        Self(format!("{} on {}", browser_of(&agent), os_of(&agent)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Order matters: Android agents also mention Linux, iPhone agents mention Mac OS X.
fn os_of(agent: &str) -> &'static str {
    if agent.contains("windows") {
        "Windows"
    } else if agent.contains("android") {
        "Android"
    } else if agent.contains("iphone") {
        "iPhone"
    } else if agent.contains("mac") {
        "Macintosh"
    } else if agent.contains("x11") || agent.contains("linux") {
        "Linux"
    } else {
        "Unknown OS"
    }
}

// Edge and Chrome agents both carry "safari"; Edge also carries "chrome".
fn browser_of(agent: &str) -> &'static str {
    if agent.contains("edg") {
        "Edge"
    } else if agent.contains("chrome") {
        "Chrome"
    } else if agent.contains("firefox") {
        "Firefox"
    } else if agent.contains("safari") {
        "Safari"
    } else if agent.contains("postman") {
        "Postman"
    } else {
        "Unknown Browser"
    }
}
