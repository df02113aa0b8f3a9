//! # board-client
//!
//! Client library for the board-sync leaderboard synchronization engine.
//!
//! This is the main library that applications embed to keep a local view
//! of the leaderboard consistent with the server.
//!
//! ## Features
//!
//! - **One-time bootstrap**: snapshot fetch + subscribe burst, serialized
//!   under concurrent invocation
//! - **Dynamic subscriptions**: membership follows viewer navigation, with
//!   a guard protecting leaderboard members and the viewer's own id
//! - **Push reconciliation**: local state is only ever updated by push
//!   events or the initial snapshot, never by HTTP write echoes
//! - **Port Abstraction**: pluggable REST and push-channel layers
//!   (reqwest, mock)
//!
//! ## Example
//!
//! ```ignore
//! use board_client::{BoardClient, BoardConfig, HttpApi, MockChannel};
//!
//! let api = HttpApi::new("https://example.com");
//! let (client, mut events) = BoardClient::new(config, api, channel);
//!
//! client.initialize().await?;
//! client.subscribe(UserId::new(7)).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod channel;
pub mod client;

pub use api::{Api, ApiError, HttpApi, MockApi};
pub use channel::{ChannelError, MockChannel, PushChannel};
pub use client::{Alert, BoardClient, BoardConfig, BoardEvents, ClientError};
