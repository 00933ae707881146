// force-gc-agent/src/jvmti_wrapper.rs
use crate::bridge::Capability;
use crate::sys::jni;
use crate::sys::jvmti;
use std::ptr;

/// A safe wrapper around the raw JVMTI Environment pointer.
///
/// Doubles as the capability handle cached by the agent: invoking it forces
/// a garbage collection.
pub struct Jvmti {
    // We keep this private so the user can't mess with raw pointers directly.
    env: *mut jvmti::jvmtiEnv,
}

// JVMTI environments may be used from any thread once created.
unsafe impl Send for Jvmti {}
unsafe impl Sync for Jvmti {}

impl Jvmti {
    /// Connects to the JVM and retrieves a JVMTI environment at `version`.
    ///
    /// Returns the raw `GetEnv` code on refusal (`JNI_EVERSION` when the VM
    /// does not speak that version).
    ///
    /// # Safety
    /// `vm` must be null or the `JavaVM*` handed to the agent by the JVM.
    pub unsafe fn with_version(vm: *mut jni::JavaVM, version: jni::jint) -> Result<Self, jni::jint> {
        if vm.is_null() || (*vm).is_null() {
            return Err(jni::JNI_EINVAL);
        }

        let mut env_ptr: *mut std::ffi::c_void = ptr::null_mut();

        // vm: *mut JavaVM = *mut *const JNIInvokeInterface_
        let res = crate::jvm_call!(vm, GetEnv, &mut env_ptr, version);
        if res != jni::JNI_OK {
            return Err(res);
        }
        if env_ptr.is_null() {
            return Err(jni::JNI_ERR);
        }

        Ok(Jvmti {
            env: env_ptr as *mut jvmti::jvmtiEnv,
        })
    }

    /// Create a Jvmti wrapper from a raw jvmtiEnv pointer
    ///
    /// # Safety
    /// The caller must ensure the pointer is valid for the duration of use.
    pub unsafe fn from_raw(env: *mut jvmti::jvmtiEnv) -> Self {
        Jvmti { env }
    }

    /// Get the raw jvmtiEnv pointer
    pub fn raw(&self) -> *mut jvmti::jvmtiEnv {
        self.env
    }

    fn functions(&self) -> &jvmti::jvmtiInterface_1_ {
        // The table outlives the environment and is never written after GetEnv.
        unsafe { &*(*self.env).functions }
    }

    /// The JVMTI version implemented by the VM, as encoded by `GetVersionNumber`.
    pub fn version_number(&self) -> Result<jni::jint, jvmti::jvmtiError> {
        let get_version_fn = self
            .functions()
            .GetVersionNumber
            .ok_or(jvmti::JVMTI_ERROR_NOT_AVAILABLE)?;

        let mut version: jni::jint = 0;
        let err = unsafe { get_version_fn(self.env, &mut version) };
        if err != jvmti::JVMTI_ERROR_NONE {
            return Err(err);
        }
        Ok(version)
    }

    /// Forces the VM to perform a garbage collection.
    ///
    /// Returns the JVMTI status code as is; `JVMTI_ERROR_NONE` on success.
    /// A VM whose table lacks the slot yields `JVMTI_ERROR_NOT_AVAILABLE`.
    pub fn force_garbage_collection(&self) -> jvmti::jvmtiError {
        match self.functions().ForceGarbageCollection {
            Some(force_fn) => unsafe { force_fn(self.env) },
            None => jvmti::JVMTI_ERROR_NOT_AVAILABLE,
        }
    }
}

impl Capability for Jvmti {
    type Args = ();

    fn invoke(&self, _args: ()) -> jni::jint {
        self.force_garbage_collection() as jni::jint
    }
}

/// Renders a `GetVersionNumber` value as `major.minor.micro`.
pub fn format_version(version: jni::jint) -> String {
    let major = (version & jvmti::JVMTI_VERSION_MASK_MAJOR) >> jvmti::JVMTI_VERSION_SHIFT_MAJOR;
    let minor = (version & jvmti::JVMTI_VERSION_MASK_MINOR) >> jvmti::JVMTI_VERSION_SHIFT_MINOR;
    let micro = version & jvmti::JVMTI_VERSION_MASK_MICRO;
    format!("{}.{}.{}", major, minor, micro)
}

/// Name of a JVMTI error code, for log records.
pub fn error_name(code: jvmti::jvmtiError) -> &'static str {
    match code {
        jvmti::JVMTI_ERROR_NONE => "JVMTI_ERROR_NONE",
        jvmti::JVMTI_ERROR_INVALID_THREAD => "JVMTI_ERROR_INVALID_THREAD",
        jvmti::JVMTI_ERROR_NOT_AVAILABLE => "JVMTI_ERROR_NOT_AVAILABLE",
        jvmti::JVMTI_ERROR_MUST_POSSESS_CAPABILITY => "JVMTI_ERROR_MUST_POSSESS_CAPABILITY",
        jvmti::JVMTI_ERROR_NULL_POINTER => "JVMTI_ERROR_NULL_POINTER",
        jvmti::JVMTI_ERROR_OUT_OF_MEMORY => "JVMTI_ERROR_OUT_OF_MEMORY",
        jvmti::JVMTI_ERROR_ACCESS_DENIED => "JVMTI_ERROR_ACCESS_DENIED",
        jvmti::JVMTI_ERROR_WRONG_PHASE => "JVMTI_ERROR_WRONG_PHASE",
        jvmti::JVMTI_ERROR_INTERNAL => "JVMTI_ERROR_INTERNAL",
        jvmti::JVMTI_ERROR_UNATTACHED_THREAD => "JVMTI_ERROR_UNATTACHED_THREAD",
        jvmti::JVMTI_ERROR_INVALID_ENVIRONMENT => "JVMTI_ERROR_INVALID_ENVIRONMENT",
        _ => "JVMTI_ERROR_UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "system" fn gc_ok(_env: *mut jvmti::jvmtiEnv) -> jvmti::jvmtiError {
        jvmti::JVMTI_ERROR_NONE
    }

    unsafe extern "system" fn gc_wrong_phase(_env: *mut jvmti::jvmtiEnv) -> jvmti::jvmtiError {
        jvmti::JVMTI_ERROR_WRONG_PHASE
    }

    unsafe extern "system" fn version_1_2_1(
        _env: *mut jvmti::jvmtiEnv,
        version_ptr: *mut jni::jint,
    ) -> jvmti::jvmtiError {
        *version_ptr = jvmti::JVMTI_VERSION_1_2 | 1;
        jvmti::JVMTI_ERROR_NONE
    }

    fn env_with(table: jvmti::jvmtiInterface_1_) -> Jvmti {
        let table: &'static jvmti::jvmtiInterface_1_ = Box::leak(Box::new(table));
        let env = Box::leak(Box::new(jvmti::jvmtiEnv { functions: table }));
        unsafe { Jvmti::from_raw(env) }
    }

    #[test]
    fn force_gc_passes_status_through() {
        let ok = env_with(jvmti::jvmtiInterface_1_ {
            ForceGarbageCollection: Some(gc_ok),
            ..Default::default()
        });
        let wrong_phase = env_with(jvmti::jvmtiInterface_1_ {
            ForceGarbageCollection: Some(gc_wrong_phase),
            ..Default::default()
        });

        assert_eq!(ok.force_garbage_collection(), jvmti::JVMTI_ERROR_NONE);
        assert_eq!(wrong_phase.invoke(()), 112);
    }

    #[test]
    fn missing_slot_reports_not_available() {
        let env = env_with(jvmti::jvmtiInterface_1_::default());

        assert_eq!(env.force_garbage_collection(), jvmti::JVMTI_ERROR_NOT_AVAILABLE);
        assert_eq!(env.version_number(), Err(jvmti::JVMTI_ERROR_NOT_AVAILABLE));
    }

    #[test]
    fn version_number_is_read_and_formatted() {
        let env = env_with(jvmti::jvmtiInterface_1_ {
            GetVersionNumber: Some(version_1_2_1),
            ..Default::default()
        });

        let version = env.version_number().unwrap();
        assert_eq!(format_version(version), "1.2.1");
        assert_eq!(format_version(jvmti::JVMTI_VERSION_11), "11.0.0");
    }

    #[test]
    fn null_vm_is_rejected() {
        let res = unsafe { Jvmti::with_version(ptr::null_mut(), jvmti::JVMTI_VERSION_1_1) };
        assert_eq!(res.err(), Some(jni::JNI_EINVAL));
    }

    #[test]
    fn error_names() {
        assert_eq!(error_name(0), "JVMTI_ERROR_NONE");
        assert_eq!(error_name(112), "JVMTI_ERROR_WRONG_PHASE");
        assert_eq!(error_name(4242), "JVMTI_ERROR_UNKNOWN");
    }
}
