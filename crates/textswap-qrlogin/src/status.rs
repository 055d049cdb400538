//! Login outcome model and status-response parsing.
//!
//! The status endpoint replies with a javascript callback invocation,
//! `ptuiCB('66','0','','0','…', '…')`, whose first field is a numeric code.
//! The code maps onto [`LoginState`] through a fixed lookup; everything the
//! client cannot classify lands on [`LoginState::Malformed`] with the
//! server-supplied message.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static PTUI_CB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ptuiCB\('(.*)','(.*)','(.*)','(.*)','(.*)', '(.*)'\)")
        .expect("ptuiCB pattern is valid")
});

/// Where the login handshake currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoginState {
    /// The scan was confirmed; the identity and session cookies are
    /// available.
    Success,
    /// The QR code has expired; a new challenge is needed.
    Expired,
    /// The QR code has not been scanned yet.
    Pending,
    /// Scanned, waiting for the user to confirm on the device.
    AwaitingConfirmation,
    /// The user declined the login on the device.
    Rejected,
    /// The endpoint rejected the request or answered with something the
    /// client cannot classify.
    Malformed,
}

/// Session cookies harvested from the post-login redirect.
#[derive(Debug, Clone, Serialize)]
pub struct SessionCookies {
    pub skey: String,
    pub p_skey: String,
    pub pt4_token: String,
}

/// The logged-in account, available on [`LoginState::Success`].
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    /// Numeric account id, as extracted from the redirect URL.
    pub id: String,
    /// Account nickname as reported by the endpoint.
    pub display_name: String,
    /// Cookies that authenticate follow-up requests.
    pub cookies: SessionCookies,
}

/// One poll of the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub state: LoginState,
    /// Human-readable description of the state.
    pub message: String,
    /// Present only when `state` is [`LoginState::Success`].
    pub identity: Option<Identity>,
}

/// The fields the client consumes from a `ptuiCB` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PtuiPayload {
    pub(crate) code: String,
    pub(crate) redirect_url: String,
    pub(crate) message: String,
    pub(crate) nickname: String,
}

impl PtuiPayload {
    /// Extracts the callback fields from a status-response body.
    pub(crate) fn parse(body: &str) -> Option<Self> {
        let caps = PTUI_CB.captures(body)?;
        Some(Self {
            code: caps[1].to_string(),
            redirect_url: caps[3].to_string(),
            message: caps[5].to_string(),
            nickname: caps[6].to_string(),
        })
    }
}

/// Maps a status code onto a state and message.
///
/// `server_message` is only used for codes outside the known table.
pub(crate) fn classify(code: &str, server_message: &str) -> (LoginState, String) {
    match code {
        "0" => (LoginState::Success, "login succeeded".to_string()),
        "7" => (
            LoginState::Malformed,
            "submitted parameters were rejected".to_string(),
        ),
        "65" => (LoginState::Expired, "the QR code has expired".to_string()),
        "66" => (
            LoginState::Pending,
            "the QR code has not been scanned yet".to_string(),
        ),
        "67" => (
            LoginState::AwaitingConfirmation,
            "scan accepted, waiting for confirmation on the device".to_string(),
        ),
        "68" => (
            LoginState::Rejected,
            "the login was declined on the device".to_string(),
        ),
        _ => (LoginState::Malformed, server_message.to_string()),
    }
}
