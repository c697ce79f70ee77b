//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `QuoteService`: quote fetching from the intents solver network
//! - `Signer`: signed swap/withdrawal intent submission
//! - `Clock`: time source and timer for the monitor loop

pub mod clock;
pub mod quote_service;
pub mod signer;
