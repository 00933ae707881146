// force-gc-agent/src/vm_wrapper.rs
use crate::bridge::HostRuntime;
use crate::jvmti_wrapper::Jvmti;
use crate::sys::jni;

/// The `JavaVM*` an agent receives in `Agent_OnLoad`.
///
/// This is the host runtime the agent negotiates its JVMTI environment from.
pub struct JavaVm {
    vm: *mut jni::JavaVM,
}

impl JavaVm {
    /// # Safety
    /// `vm` must be null or a live `JavaVM*`. A null pointer is accepted and
    /// makes every handshake fail with `JNI_EINVAL`.
    pub unsafe fn from_raw(vm: *mut jni::JavaVM) -> Self {
        JavaVm { vm }
    }
}

impl HostRuntime for JavaVm {
    type Handle = Jvmti;

    fn acquire(&self, version: jni::jint) -> Result<Jvmti, jni::jint> {
        // from_raw guarantees the pointer is null or live.
        unsafe { Jvmti::with_version(self.vm, version) }
    }
}
