//! Atom Feed Simulator
//!
//! A stand-in for the Event Store HTTP API that serves fixed, in-memory streams
//! as paginated Atom feeds, for exercising feed readers without a real store.
//!
//! # Features
//!
//! - **Feed pages**: `/streams/{stream}/{version}/{direction}/{pageSize}` with
//!   `self`, `first`, `last`, `next`, `previous` and `metadata` links
//! - **Single events**: any event's own URI returns that event
//! - **Stream metadata**: `/streams/{stream}/metadata`
//! - **Test server**: [`SimulatorServer`] binds an ephemeral port for client tests
//!
//! # Example
//!
//! ```rust,no_run
//! use esmock_core::{AtomFeedSimulator, ServerOptions, SimulatorOptions, start_server};
//! use esmock_core::testdata::create_test_events;
//!
//! #[tokio::main]
//! async fn main() {
//!     let options = ServerOptions::default();
//!     let events = create_test_events(100, "orders", &options.base_url(), &["OrderPlaced"]);
//!     let simulator = AtomFeedSimulator::new(events, SimulatorOptions::default()).unwrap();
//!
//!     start_server(simulator, options).await.unwrap();
//! }
//! ```
//!
//! # Paging
//!
//! Pages always list events newest first. Reading backward from `head` starts
//! at the newest event; following `next` walks toward event 0 and stops once
//! the oldest page is reached:
//!
//! ```text
//! GET /streams/orders/head/backward/20   -> 99..80, next = 79/backward/20
//! GET /streams/orders/79/backward/20     -> 79..60, next = 59/backward/20
//! GET /streams/orders/0/forward/20       -> 19..0,  previous = 20/forward/20
//! ```

pub mod error;
pub mod feed;
pub mod links;
pub mod parser;
pub mod resolver;
pub mod server;
pub mod simulator;
pub mod testdata;
pub mod window;

pub use error::{Result, ServerError, SimulatorError};
pub use esmock_types as types;
pub use parser::{Resource, parse_resource, parse_url};
pub use server::{
    ATOM_JSON_CONTENT_TYPE, AppState, ServerOptions, SimulatorServer, create_router,
    start_server,
};
pub use simulator::{AtomFeedSimulator, SimulatorOptions, SimulatorResponse};
pub use window::Window;
