//! Process-wide cache for a capability handle handed out by a host runtime.
//!
//! A native extension is loaded once, asks its host for a handle during the
//! load callback, and then serves calls from managed code against that handle.
//! [`CapabilityBridge`] owns that cache:
//!
//! - [`CapabilityBridge::initialize`] performs the handshake exactly once.
//!   Later calls, concurrent or not, never reacquire and never overwrite.
//! - [`CapabilityBridge::invoke`] relays a call through the stored handle and
//!   returns the host's status code untouched, or
//!   [`InvokeError::NotInitialized`] when there is no handle to call.
//!
//! The bridge is `const`-constructible so it can live in a `static`:
//!
//! ```rust,ignore
//! static GC_BRIDGE: CapabilityBridge<Jvmti> = CapabilityBridge::new("force-gc");
//!
//! // Agent_OnLoad
//! let vm = unsafe { JavaVm::from_raw(vm_ptr) };
//! let _ = GC_BRIDGE.initialize(&vm, jvmti::JVMTI_VERSION_1_1);
//!
//! // native method
//! let status = GC_BRIDGE.invoke(()).unwrap_or(jni::JNI_ERR);
//! ```

use std::sync::OnceLock;

use log::{debug, warn};
use thiserror::Error;

use crate::sys::jni::jint;

/// Something a host runtime can hand out a capability handle from.
pub trait HostRuntime {
    type Handle: Capability;

    /// Version-tagged handshake. On refusal returns the host's raw error code.
    fn acquire(&self, version: jint) -> Result<Self::Handle, jint>;
}

/// A handle granting one privileged host operation.
///
/// Handles are shared by every thread that calls into the extension, so they
/// must be `Send + Sync`.
pub trait Capability: Send + Sync {
    /// Arguments forwarded opaquely to the host call. `()` when there are none.
    type Args;

    /// Calls the operation and returns the host's native status code.
    fn invoke(&self, args: Self::Args) -> jint;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    #[error("host runtime refused a capability handle for version {version:#010x} (code {code})")]
    HandshakeFailed { version: jint, code: jint },
    #[error("capability handle was already acquired in this process")]
    AlreadyInitialized,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvokeError {
    #[error("capability invoked before a handle was acquired")]
    NotInitialized,
}

/// One-shot handle store plus invocation relay.
///
/// The inner `Option` is `None` when the handshake ran and failed: the store
/// counts as initialized (no second handshake) but has nothing to call.
pub struct CapabilityBridge<C> {
    name: &'static str,
    slot: OnceLock<Option<C>>,
}

impl<C> CapabilityBridge<C> {
    pub const fn new(name: &'static str) -> Self {
        CapabilityBridge {
            name,
            slot: OnceLock::new(),
        }
    }

    /// True once a handshake has completed, whether or not it succeeded.
    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }

    /// True when a handle is held and [`invoke`](Self::invoke) will reach the host.
    pub fn is_ready(&self) -> bool {
        self.handle().is_some()
    }

    /// Read-only view of the stored handle.
    pub fn handle(&self) -> Option<&C> {
        self.slot.get().and_then(Option::as_ref)
    }
}

impl<C: Capability> CapabilityBridge<C> {
    /// Acquires the handle from `host` and stores it.
    ///
    /// Only the first call in a process performs the handshake. Every later
    /// call returns [`InitError::AlreadyInitialized`] and leaves the store as
    /// it was, even if the first handshake failed.
    pub fn initialize<H>(&self, host: &H, version: jint) -> Result<(), InitError>
    where
        H: HostRuntime<Handle = C>,
    {
        let mut outcome = Err(InitError::AlreadyInitialized);

        self.slot.get_or_init(|| match host.acquire(version) {
            Ok(handle) => {
                debug!("[{}] acquired capability handle (version {:#010x})", self.name, version);
                outcome = Ok(());
                Some(handle)
            }
            Err(code) => {
                // Reported once, by the caller that gets the error back.
                let err = InitError::HandshakeFailed { version, code };
                debug!("[{}] {}", self.name, err);
                outcome = Err(err);
                None
            }
        });

        if outcome == Err(InitError::AlreadyInitialized) {
            warn!("[{}] ignoring repeated initialization; keeping the first handle", self.name);
        }
        outcome
    }

    /// Relays one call through the stored handle.
    pub fn invoke(&self, args: C::Args) -> Result<jint, InvokeError> {
        match self.handle() {
            Some(handle) => Ok(handle.invoke(args)),
            None => Err(InvokeError::NotInitialized),
        }
    }
}
