//! AI-assisted talent management insights: succession planning, leadership
//! development, skill-gap analysis, and workforce forecasting over an
//! in-memory directory of employees, roles, and training programs.

pub mod chat;
pub mod config;
pub mod domain;
pub mod error;
pub mod gemini;
pub mod insights;
pub mod mock;
pub mod telemetry;
