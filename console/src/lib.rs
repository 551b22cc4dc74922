//! Building blocks of the catalog console: configuration, logging, the
//! ureq transport, terminal capabilities, and the command parser.

pub mod command;
pub mod config;
pub mod error;
pub mod observability;
pub mod terminal;
pub mod transport;
