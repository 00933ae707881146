//! # force-gc-agent
//!
//! A JVMTI agent that lets Java code force a garbage-collection cycle.
//!
//! Java offers no reliable way to force a collection: `System.gc()` is a hint.
//! JVMTI's `ForceGarbageCollection` is not, but it is only reachable from
//! native code. This crate is that native code: load it with `-agentpath`
//! and call `mikenakis.Garbager.forceGarbageCollection()`.
//!
//! ```bash
//! cargo build --release
//! java -agentpath:./target/release/libforce_gc_agent.so=version=1.1,log=info MyApp
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Exported symbols (agent module + export_agent!)   │
//! │   Agent_OnLoad, Agent_OnUnload,                          │
//! │   Java_mikenakis_Garbager_forceGarbageCollection         │
//! ├─────────────────────────────────────────────────────────┤
//! │              CapabilityBridge (bridge module)            │
//! │   one-shot handle store + invocation relay               │
//! ├─────────────────────────────────────────────────────────┤
//! │              High-Level Wrappers (env module)            │
//! │   env::JavaVm - host runtime, GetEnv handshake           │
//! │   env::Jvmti  - capability handle, ForceGarbageCollection│
//! ├─────────────────────────────────────────────────────────┤
//! │              Raw FFI Bindings (sys module)               │
//! │   sys::jni, sys::jvmti                                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`bridge`] | Generic handle cache: [`bridge::CapabilityBridge`] |
//! | [`env`] | [`env::JavaVm`] and [`env::Jvmti`] wrappers |
//! | [`agent`] | [`agent::GcAgent`] and the native-method relay |
//! | [`options`] | Parsing of the `-agentpath` options string |
//! | [`naming`] | JNI symbol-name mangling |
//! | [`sys`] | Raw JNI / JVMTI declarations |
//!
//! ## Status codes seen by Java
//!
//! | Value | Meaning |
//! |-------|---------|
//! | `0` | Collection forced (`JVMTI_ERROR_NONE`) |
//! | `> 0` | Any other JVMTI error code, passed through untouched |
//! | `-1` | [`agent::STATUS_NOT_INITIALIZED`]: the agent has no JVMTI environment |

pub mod sys;
pub mod env;
pub mod bridge;
pub mod options;
pub mod naming;
pub mod agent;
pub mod prelude;

// Implementation modules (use `env` module for the public API)
#[doc(hidden)]
pub mod jvmti_wrapper;
#[doc(hidden)]
pub mod vm_wrapper;

use std::sync::OnceLock;
pub use crate::sys::jni as jni;

/// Load and unload hooks of a JVMTI agent.
///
/// Implement this trait and use [`export_agent!`] to create a loadable agent
/// library.
///
/// # Thread Safety
///
/// Your agent must be `Sync + Send`: after `on_load` it is reachable from any
/// JVM thread through the global instance.
pub trait Agent: Sync + Send {
    /// Called when the agent is loaded into the JVM.
    ///
    /// Return `JNI_OK` (0) on success, or `JNI_ERR` (-1) to abort VM startup.
    fn on_load(&self, vm: *mut jni::JavaVM, options: &str) -> jni::jint;

    /// Called when the agent is unloaded (JVM shutdown).
    fn on_unload(&self) {}
}

// The global singleton.
// This holds the Agent instance so the exported C functions can find it.
pub static GLOBAL_AGENT: OnceLock<Box<dyn Agent>> = OnceLock::new();

/// Helper to initialize the global agent (called by the macro).
///
/// Fails when an agent is already registered, i.e. on a repeated load.
pub fn set_global_agent(agent: Box<dyn Agent>) -> Result<(), ()> {
    GLOBAL_AGENT.set(agent).map_err(|_| ())
}

/// Exports your agent type as a loadable JVMTI agent library.
///
/// Generates the `Agent_OnLoad` and `Agent_OnUnload` entry points the JVM
/// looks up when loading an agent via `-agentpath` or `-agentlib`.
///
/// # Requirements
///
/// Your agent type must implement [`Agent`] and [`Default`].
///
/// # Generated Functions
///
/// - **`Agent_OnLoad`**: registers an instance globally and calls
///   [`Agent::on_load`]. If the library is loaded a second time in the same
///   process, the instance from the first load handles the call.
/// - **`Agent_OnUnload`**: calls [`Agent::on_unload`].
///
/// A panic inside either hook is caught at the boundary; `Agent_OnLoad` then
/// returns `JNI_ERR`.
#[macro_export]
macro_rules! export_agent {
    ($agent_type:ty) => {
        #[no_mangle]
        pub unsafe extern "system" fn Agent_OnLoad(
            vm: *mut $crate::sys::jni::JavaVM,
            options: *mut std::ffi::c_char,
            _reserved: *mut std::ffi::c_void,
        ) -> $crate::sys::jni::jint {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                // 1. Register the agent; a reload keeps the first instance.
                let _ = $crate::set_global_agent(Box::new(<$agent_type>::default()));

                // 2. Handle options
                let options_str = if options.is_null() {
                    String::new()
                } else {
                    std::ffi::CStr::from_ptr(options).to_string_lossy().into_owned()
                };

                // 3. Call the agent's logic
                match $crate::GLOBAL_AGENT.get() {
                    Some(agent) => agent.on_load(vm, &options_str),
                    None => $crate::sys::jni::JNI_ERR,
                }
            }));
            result.unwrap_or($crate::sys::jni::JNI_ERR)
        }

        #[no_mangle]
        pub unsafe extern "system" fn Agent_OnUnload(_vm: *mut $crate::sys::jni::JavaVM) {
            let _ = std::panic::catch_unwind(|| {
                if let Some(agent) = $crate::GLOBAL_AGENT.get() {
                    agent.on_unload();
                }
            });
        }
    };
}

export_agent!(agent::GcAgent);

pub use agent::Java_mikenakis_Garbager_forceGarbageCollection;
