//! API handlers
//!
//! Each handler follows the same pattern: extract what it needs from the
//! request, run the check, and map the outcome onto the fixed wire format.

pub mod health;
