use std::fmt;

use anyhow::Result;

/// Source of form answers. The terminal implementation is [`InquireDriver`];
/// tests script the answers instead.
///
/// [`InquireDriver`]: super::InquireDriver
pub trait PromptDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;

    /// Integer in `min..=max`; the widget re-prompts on anything else.
    fn ask_u32(&self, title: &str, help: &str, default: u32, min: u32, max: u32) -> Result<u32>;

    /// Float in `min..=max`; the widget re-prompts on anything else.
    fn ask_f64(&self, title: &str, help: &str, default: f64, min: f64, max: f64) -> Result<f64>;
}

/// The user dismissed a prompt (Esc or Ctrl-C).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("prompt cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Cancelled>().is_some()
}
