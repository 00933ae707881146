//! Common imports for code built on the bridge.
//!
//! This prelude is intentionally small.

pub use crate::bridge::{Capability, CapabilityBridge, HostRuntime, InitError, InvokeError};
pub use crate::env::{JavaVm, Jvmti};
pub use crate::export_agent;
pub use crate::sys::{jni, jvmti};
pub use crate::Agent;
