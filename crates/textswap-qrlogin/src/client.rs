//! The blocking login client.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use ureq::Agent;

use crate::cookies::SetCookie;
use crate::error::QrLoginError;
use crate::status::{classify, Identity, LoginOutcome, PtuiPayload, SessionCookies};
use crate::token::qr_token;

const DEFAULT_APPID: &str = "549000912";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36 Edg/97.0.1072.55";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The account id is only present inside the redirect URL.
static UIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&uin=([1-9][0-9]{4,9})&").expect("uin pattern is valid"));

/// A fetched login challenge.
#[derive(Debug, Clone, Serialize)]
pub struct QrChallenge {
    /// Session token the endpoint sets as the `qrsig` cookie; feed it to
    /// [`QrLogin::poll`].
    pub qrsig: String,
    /// Challenge image as a `data:image/png;base64,…` URI, ready for an
    /// `<img>` tag.
    pub image: String,
}

/// Blocking client for the QR-code login handshake.
///
/// Each operation is one network call: [`fetch_challenge`] retrieves the
/// QR image and its session token, and [`poll`] asks the endpoint where the
/// handshake stands, harvesting the session cookies once it succeeds.
///
/// # Example
///
/// ```no_run
/// use textswap_qrlogin::{LoginState, QrLogin};
///
/// let client = QrLogin::new();
/// let challenge = client.fetch_challenge()?;
/// // ...display challenge.image and wait for the scan...
/// let outcome = client.poll(&challenge.qrsig)?;
/// if outcome.state == LoginState::Success {
///     let identity = outcome.identity.unwrap();
///     println!("logged in as {} ({})", identity.display_name, identity.id);
/// }
/// # Ok::<(), textswap_qrlogin::QrLoginError>(())
/// ```
///
/// [`fetch_challenge`]: QrLogin::fetch_challenge
/// [`poll`]: QrLogin::poll
pub struct QrLogin {
    appid: String,
    user_agent: String,
    agent: Agent,
}

impl QrLogin {
    /// Creates a client with the stock application id, a desktop browser
    /// user agent and a 10 second timeout.
    pub fn new() -> Self {
        Self {
            appid: DEFAULT_APPID.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            agent: create_agent(DEFAULT_TIMEOUT),
        }
    }

    /// Overrides the application id sent with every request.
    pub fn appid(mut self, appid: impl Into<String>) -> Self {
        self.appid = appid.into();
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.agent = create_agent(timeout);
        self
    }

    /// Fetches a login challenge: the QR image plus the `qrsig` session
    /// token that identifies this handshake.
    ///
    /// # Errors
    ///
    /// [`QrLoginError::Http`] when the request fails,
    /// [`QrLoginError::Protocol`] on a non-200 response or when the
    /// response does not set a `qrsig` cookie.
    pub fn fetch_challenge(&self) -> Result<QrChallenge, QrLoginError> {
        let url = self.challenge_url();
        let mut response = self
            .agent
            .get(&url)
            .header("User-Agent", self.user_agent.as_str())
            .call()?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(QrLoginError::Protocol(format!(
                "challenge request returned HTTP {status}"
            )));
        }

        let qrsig = response
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(SetCookie::parse)
            .find(|c| c.name == "qrsig")
            .map(|c| c.value)
            .ok_or_else(|| {
                QrLoginError::Protocol("challenge response did not set a qrsig cookie".to_string())
            })?;

        let image = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| QrLoginError::Http(e.to_string()))?;

        Ok(QrChallenge {
            qrsig,
            image: format!("data:image/png;base64,{}", BASE64_STANDARD.encode(&image)),
        })
    }

    /// Polls the login status for a challenge's session token.
    ///
    /// Non-final states (`Pending`, `AwaitingConfirmation`) are expected
    /// answers, not errors; keep polling until the state is final. On
    /// `Success` the returned outcome carries the identity and session
    /// cookies harvested from the redirect response.
    ///
    /// # Errors
    ///
    /// [`QrLoginError::Http`] when a request fails,
    /// [`QrLoginError::Protocol`] when a response is not in handshake shape
    /// (missing `ptuiCB` payload, un-extractable account id, missing or
    /// malformed session cookies).
    pub fn poll(&self, qrsig: &str) -> Result<LoginOutcome, QrLoginError> {
        let url = self.poll_url(qrsig);
        let mut response = self
            .agent
            .get(&url)
            .header("User-Agent", self.user_agent.as_str())
            .header("Cookie", format!("qrsig={qrsig}"))
            .call()?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(QrLoginError::Protocol(format!(
                "login status request returned HTTP {status}"
            )));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| QrLoginError::Http(e.to_string()))?;
        let payload = PtuiPayload::parse(&body).ok_or_else(|| {
            QrLoginError::Protocol("login response did not contain a ptuiCB payload".to_string())
        })?;

        if payload.code != "0" {
            let (state, message) = classify(&payload.code, &payload.message);
            return Ok(LoginOutcome {
                state,
                message,
                identity: None,
            });
        }

        self.complete_login(&payload)
    }

    /// Finishes a successful handshake: extracts the account id and
    /// harvests the session cookies from the redirect response.
    fn complete_login(&self, payload: &PtuiPayload) -> Result<LoginOutcome, QrLoginError> {
        let id = UIN
            .captures(&payload.redirect_url)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| {
                QrLoginError::Protocol(
                    "redirect URL does not carry an account id".to_string(),
                )
            })?;

        let cookies = self.harvest_cookies(&payload.redirect_url)?;
        if cookies.skey.len() != 10 || cookies.p_skey.len() != 44 || cookies.pt4_token.len() != 44 {
            return Err(QrLoginError::Protocol(
                "session cookies were malformed".to_string(),
            ));
        }

        let (state, message) = classify("0", "");
        Ok(LoginOutcome {
            state,
            message,
            identity: Some(Identity {
                id,
                display_name: payload.nickname.clone(),
                cookies,
            }),
        })
    }

    /// Fetches the redirect URL WITHOUT following the redirect and collects
    /// the session cookies it sets: `skey` on `qq.com`, `p_skey` and
    /// `pt4_token` on `game.qq.com`.
    fn harvest_cookies(&self, url: &str) -> Result<SessionCookies, QrLoginError> {
        let response = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()?;

        let mut skey = None;
        let mut p_skey = None;
        let mut pt4_token = None;
        for value in response.headers().get_all("set-cookie").iter() {
            let Ok(raw) = value.to_str() else {
                continue;
            };
            let Some(cookie) = SetCookie::parse(raw) else {
                continue;
            };
            match (cookie.domain.as_deref(), cookie.name.as_str()) {
                (Some("qq.com"), "skey") => skey = Some(cookie.value),
                (Some("game.qq.com"), "p_skey") => p_skey = Some(cookie.value),
                (Some("game.qq.com"), "pt4_token") => pt4_token = Some(cookie.value),
                _ => {}
            }
        }

        match (skey, p_skey, pt4_token) {
            (Some(skey), Some(p_skey), Some(pt4_token)) => Ok(SessionCookies {
                skey,
                p_skey,
                pt4_token,
            }),
            _ => Err(QrLoginError::Protocol(
                "redirect response did not set the expected session cookies".to_string(),
            )),
        }
    }

    /// URL for the challenge image, with a random cache-busting `t`.
    fn challenge_url(&self) -> String {
        let t: f32 = rand::rng().random();
        format!(
            "https://ssl.ptlogin2.qq.com/ptqrshow?appid={}&e=2&l=M&s=3&d=72&v=4&t={t:.16}&daid=8&pt_3rd_aid=0",
            self.appid
        )
    }

    /// URL for one status poll: computed check token, millisecond action
    /// stamp and the session token itself.
    fn poll_url(&self, qrsig: &str) -> String {
        let token = qr_token(qrsig);
        let action = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        format!(
            "https://xui.ptlogin2.qq.com/ssl/ptqrlogin?u1=https%3A%2F%2Fcf.qq.com%2F\
             &ptqrtoken={token}&ptredirect=1&h=1&t=1&g=1&from_ui=1&ptlang=2052\
             &action=0-0-{action}&js_ver=22011714&js_type=1&login_sig={qrsig}\
             &pt_uistyle=40&aid={appid}&daid=8&",
            appid = self.appid
        )
    }
}

impl Default for QrLogin {
    fn default() -> Self {
        Self::new()
    }
}

/// One pooled agent for the whole handshake. Redirects stay disabled so the
/// post-login redirect response itself can be read for its cookies, and
/// non-2xx statuses come back as responses for manual checking.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .max_redirects(0)
        .http_status_as_error(false)
        .build()
        .into()
}
