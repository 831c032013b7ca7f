//! Built-in decision sources.
//!
//! - [`ScriptedPolicyProvider`] drives enemies (or allies in auto mode) with
//!   the percentile policy from `game_core::engine::policy`.
//! - [`ChannelActionProvider`] forwards actions chosen elsewhere, e.g. by a
//!   terminal or UI task holding the sender.

mod channel;
mod policy;

pub use channel::ChannelActionProvider;
pub use policy::ScriptedPolicyProvider;
