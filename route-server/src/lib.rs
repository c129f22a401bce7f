//! Multi-hop route finder server.
//!
//! A web application that answers: "Which ways are there to get from this
//! location to that one, taking exactly one flight with local transport
//! on either side?"

pub mod cache;
pub mod domain;
pub mod planner;
pub mod store;
pub mod web;
