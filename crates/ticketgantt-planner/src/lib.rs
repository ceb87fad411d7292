//! # ticketgantt-planner
//!
//! Ticket-producing services for the ticketgantt engine.
//!
//! This crate provides:
//! - `TemplateExpander`: parent specification + templates → parent and children
//! - `TicketService`: validated creation, batch saves and edits over a backend
//!
//! ## Example
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveDateTime};
//! use ticketgantt_core::{MemoryStore, Template};
//! use ticketgantt_planner::{ParentSpec, TicketService};
//!
//! let mut store = MemoryStore::new()
//!     .with_assignee("alice")
//!     .with_template(Template::new("Design", 0, 3))
//!     .with_template(Template::new("Implement", 3, 5));
//!
//! let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
//! let spec = ParentSpec::new("Login page", "alice", start)
//!     .end(NaiveDate::from_ymd_opt(2024, 4, 10).unwrap());
//!
//! let expansion = TicketService::new(&mut store)
//!     .create_from_templates(&spec, NaiveDateTime::default())
//!     .unwrap();
//! assert_eq!(expansion.children.len(), 2);
//! assert_eq!(store.tickets.len(), 3);
//! ```

pub mod expand;
pub mod service;
pub mod validate;

pub use expand::{EndDatePolicy, Expansion, ParentSpec, TemplateExpander};
pub use service::{NewTicket, TicketBackend, TicketService, TicketUpdate};
