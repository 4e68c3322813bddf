//! Command-line front end for datachat intent classification

pub mod commands;
pub mod logging;
pub mod router;
