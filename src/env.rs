//! High-level wrappers over the raw JVM pointers.
//!
//! - [`JavaVm`] wraps the `JavaVM*` passed to `Agent_OnLoad`. It is the
//!   [`HostRuntime`](crate::bridge::HostRuntime) the agent negotiates with.
//! - [`Jvmti`] wraps a `jvmtiEnv*`. It is the
//!   [`Capability`](crate::bridge::Capability) handle: invoking it forces a
//!   garbage collection and returns the JVMTI status code.
//!
//! ```rust,ignore
//! use force_gc_agent::env::{JavaVm, Jvmti};
//!
//! let vm = unsafe { JavaVm::from_raw(vm_ptr) };
//! let jvmti: Jvmti = vm.acquire(jvmti::JVMTI_VERSION_1_1)?;
//! assert_eq!(jvmti.force_garbage_collection(), jvmti::JVMTI_ERROR_NONE);
//! ```

mod jvmti_impl {
    pub use crate::jvmti_wrapper::{error_name, format_version, Jvmti};
}

mod vm_impl {
    pub use crate::vm_wrapper::JavaVm;
}

pub use jvmti_impl::{error_name, format_version, Jvmti};
pub use vm_impl::JavaVm;
