//! Read-only client for the Worx Landroid cloud API.
//!
//! ```no_run
//! use landroid::{Credentials, LandroidClient, MowerList};
//!
//! # async fn run() -> landroid::Result<()> {
//! let credentials = Credentials::new("client-id", "client-secret", "mail@example.com", "password");
//! let mut client = LandroidClient::connect(credentials).await?;
//!
//! let list = MowerList::fetch(&mut client).await?;
//! for mower in &list.mowers {
//!     let mut poller = client.get_mower_status(&mower.serial_number, true).await?;
//!     if let Some(status) = poller.state() {
//!         println!("{}: {}", mower.name, status.status_code);
//!     }
//!     poller.update(&mut client).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod mower;
pub mod ratelimit;
mod schemas;
pub mod states;
pub mod store;
pub mod token;

pub use auth::{Credentials, TokenManager};
pub use client::{ClientOptions, LandroidClient, BASE_URL, DEFAULT_TIMEOUT};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{Battery, Mower, MowerConfig, MowerStatus, Orientation, Statistics};
pub use mower::{MowerInfo, MowerList, MowerState};
pub use ratelimit::RateLimiter;
pub use states::{MowerCode, MowerErrorCode};
pub use store::TokenStore;
pub use token::Token;
