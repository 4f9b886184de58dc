//! Administration CLI for deployed Elsa Data instances.
//!
//! One sequential pipeline: resolve the command function via Cloud Map,
//! invoke it with the operator's command string, wait for completion, then
//! page the reported CloudWatch log stream and pretty-print each line.
//!
//! Pure core / impure shell: the stage modules ([`discover`], [`invoke`],
//! [`fetch`], [`format`]) hold the logic behind small trait seams, and
//! [`aws`] is the only module that talks to the outside world.

pub mod aws;
pub mod config;
pub mod discover;
pub mod fetch;
pub mod format;
pub mod invoke;
pub mod logging;
pub mod model;
pub mod pipeline;
