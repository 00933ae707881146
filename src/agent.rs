//! The force-GC agent and its native-method entry point.
//!
//! Java side:
//!
//! ```java
//! package mikenakis;
//!
//! public class Garbager {
//!     private static native int forceGarbageCollection();
//! }
//! ```
//!
//! Run with `java -agentpath:./target/release/libforce_gc_agent.so=log=debug ...`.
//! `forceGarbageCollection()` then returns the JVMTI status of
//! `ForceGarbageCollection` (0 on success), or [`STATUS_NOT_INITIALIZED`] when
//! the agent never got a JVMTI environment.

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, error, info, warn, LevelFilter};

use crate::bridge::{CapabilityBridge, InitError};
use crate::env::{error_name, format_version, JavaVm, Jvmti};
use crate::options::AgentOptions;
use crate::sys::{jni, jvmti};
use crate::Agent;

/// Returned to Java when no JVMTI environment is held.
///
/// JVMTI error codes are non-negative, so this never collides with one.
pub const STATUS_NOT_INITIALIZED: jni::jint = jni::JNI_ERR;

/// The process-wide JVMTI handle, filled in by `Agent_OnLoad`.
pub static GC_BRIDGE: CapabilityBridge<Jvmti> = CapabilityBridge::new("force-gc");

static COLLECTIONS: AtomicU64 = AtomicU64::new(0);

#[derive(Default)]
pub struct GcAgent;

impl Agent for GcAgent {
    fn on_load(&self, vm: *mut jni::JavaVM, options: &str) -> jni::jint {
        let (opts, options_error) = match AgentOptions::parse(options) {
            Ok(opts) => (opts, None),
            Err(e) => (AgentOptions::default(), Some(e)),
        };
        init_logging(&opts);

        info!("[GcAgent] loading force-gc agent (options: '{}')", options);
        if let Some(e) = options_error {
            warn!("[GcAgent] {}; using defaults", e);
        }
        for item in &opts.ignored {
            warn!("[GcAgent] ignoring unknown option '{}'", item);
        }

        let host = unsafe { JavaVm::from_raw(vm) };
        match GC_BRIDGE.initialize(&host, opts.jvmti_version.raw()) {
            Ok(()) => {
                if let Some(jvmti) = GC_BRIDGE.handle() {
                    match jvmti.version_number() {
                        Ok(v) => info!("[GcAgent] JVMTI {} ready", format_version(v)),
                        Err(e) => debug!("[GcAgent] JVMTI ready; version unknown ({})", error_name(e)),
                    }
                }
            }
            Err(e @ InitError::HandshakeFailed { .. }) => {
                error!("[GcAgent] unable to access JVMTI: {}", e)
            }
            // The bridge already warned; the first handle stays in use.
            Err(InitError::AlreadyInitialized) => {}
        }

        // A failed handshake degrades the agent; it never aborts the VM.
        jni::JNI_OK
    }

    fn on_unload(&self) {
        info!(
            "[GcAgent] unloading after {} forced collection(s)",
            COLLECTIONS.load(Ordering::Relaxed)
        );
    }
}

fn init_logging(opts: &AgentOptions) {
    // A second load keeps the logger installed by the first one.
    let rust_log = std::env::var("RUST_LOG").ok();
    let _ = logger_builder(opts.log_level, rust_log.as_deref()).try_init();
}

/// `RUST_LOG` directives, when present, replace the `log` option's level.
fn logger_builder(level: LevelFilter, rust_log: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Some(filters) = rust_log {
        builder.parse_filters(filters);
    }
    builder.target(env_logger::Target::Stderr);
    builder
}

/// Forces a collection through the cached JVMTI environment.
///
/// Returns the JVMTI status verbatim, or [`STATUS_NOT_INITIALIZED`].
pub fn force_garbage_collection() -> jni::jint {
    match GC_BRIDGE.invoke(()) {
        Ok(status) => {
            if status == jvmti::JVMTI_ERROR_NONE as jni::jint {
                COLLECTIONS.fetch_add(1, Ordering::Relaxed);
                debug!("[GcAgent] forced garbage collection");
            } else {
                warn!(
                    "[GcAgent] ForceGarbageCollection returned {} ({})",
                    status,
                    error_name(status as jvmti::jvmtiError)
                );
            }
            status
        }
        Err(e) => {
            error!("[GcAgent] {}", e);
            STATUS_NOT_INITIALIZED
        }
    }
}

/// Number of collections the JVM reported as done (status `JVMTI_ERROR_NONE`).
pub fn collections_forced() -> u64 {
    COLLECTIONS.load(Ordering::Relaxed)
}

/// `private static native int forceGarbageCollection()` of `mikenakis.Garbager`.
#[no_mangle]
pub extern "system" fn Java_mikenakis_Garbager_forceGarbageCollection(
    _env: *mut jni::JNIEnv,
    _class: jni::jclass,
) -> jni::jint {
    std::panic::catch_unwind(force_garbage_collection).unwrap_or(jni::JNI_ERR)
}
