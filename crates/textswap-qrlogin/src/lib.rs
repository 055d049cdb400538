//! Blocking client for the QQ QR-code login handshake.
//!
//! The handshake is three steps, each one network call:
//!
//! 1. [`QrLogin::fetch_challenge`] retrieves the QR challenge image and the
//!    `qrsig` session token that identifies the handshake.
//! 2. [`QrLogin::poll`] asks the status endpoint where the handshake
//!    stands. The endpoint answers with a `ptuiCB(...)` callback whose code
//!    maps onto [`LoginState`]; keep polling while the state is
//!    [`Pending`](LoginState::Pending) or
//!    [`AwaitingConfirmation`](LoginState::AwaitingConfirmation).
//! 3. On success the client fetches the redirect URL without following it
//!    and harvests the session cookies (`skey`, `p_skey`, `pt4_token`)
//!    into the returned [`Identity`].
//!
//! Polling authenticates itself with a numeric check token derived from the
//! session token by [`qr_token`], a fixed rolling hash the endpoint
//! validates bit-for-bit.
//!
//! # Example
//!
//! ```no_run
//! use std::thread::sleep;
//! use std::time::Duration;
//! use textswap_qrlogin::{LoginState, QrLogin};
//!
//! let client = QrLogin::new();
//! let challenge = client.fetch_challenge()?;
//! // challenge.image is a data URI, ready to display.
//!
//! loop {
//!     let outcome = client.poll(&challenge.qrsig)?;
//!     match outcome.state {
//!         LoginState::Pending | LoginState::AwaitingConfirmation => {
//!             sleep(Duration::from_secs(2));
//!         }
//!         _ => {
//!             println!("{}", outcome.message);
//!             break;
//!         }
//!     }
//! }
//! # Ok::<(), textswap_qrlogin::QrLoginError>(())
//! ```

mod client;
mod cookies;
mod error;
mod status;
mod token;

// Re-export public API
pub use client::{QrChallenge, QrLogin};
pub use error::QrLoginError;
pub use status::{Identity, LoginOutcome, LoginState, SessionCookies};
pub use token::qr_token;
