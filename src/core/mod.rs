//! Core library components.
//!
//! Parsing, scope resolution, encryption and the sealing pipeline. Nothing
//! here talks to a cluster; collaborators come in through [`store`].

pub mod annotations;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod parser;
pub mod pipeline;
pub mod scope;
pub mod store;
pub mod types;
