//! MCP server exposing Gemini image generation, editing and description
//!
//! The `ai::gemini` modules translate caller options into Gemini
//! `generateContent` requests and normalize the heterogeneous response parts
//! into a small result type. The `server` module publishes those operations,
//! plus a catalog of canned prompts, over the Model Context Protocol.

pub mod ai;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};
