//! Issue-processing runtime for the Jinny issue responder.
//!
//! Loads prompt rules, turns assigned issues into chat conversations, posts
//! the model's replies, and dispatches processing cycles either from an HTTP
//! notification endpoint or from a polling loop.

pub mod issue_flight_guard;
pub mod polling;
pub mod reply_generator;
pub mod rules;
pub mod server;
pub mod task_processor;

pub use issue_flight_guard::{IssueFlightGuard, IssueFlightPermit};
pub use polling::run_polling_loop;
pub use reply_generator::{ReplyGenerator, ReplyGeneratorConfig, DEFAULT_CHAT_MODEL};
pub use rules::{load_rules, parse_rules, resolve_rules_path, Rule};
pub use server::{build_router, run_server, ServerState};
pub use task_processor::{decide, ProcessingDecision, TaskProcessor};
