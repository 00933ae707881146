// force-gc-agent/src/sys/jni.rs
//
// The slice of the JNI (Java Native Interface) ABI this agent touches.
//
// Layout follows jni.h. The agent never calls through JNIEnv, so the native
// interface table stays opaque; only the JavaVM invocation table is spelled out.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::ffi::c_void;

// =============================================================================
// Primitive Types
// =============================================================================

pub type jint = i32;
pub type jlong = i64;
pub type jboolean = u8;

// =============================================================================
// Reference Types (opaque pointers)
// =============================================================================

pub type jobject = *mut c_void;
pub type jclass = jobject;

// =============================================================================
// Constants
// =============================================================================

pub const JNI_OK: jint = 0;
pub const JNI_ERR: jint = -1;
pub const JNI_EDETACHED: jint = -2;
pub const JNI_EVERSION: jint = -3;
pub const JNI_ENOMEM: jint = -4;
pub const JNI_EEXIST: jint = -5;
pub const JNI_EINVAL: jint = -6;

// =============================================================================
// JNIEnv - opaque per-thread environment
// =============================================================================

/// The JNI function table. Never dereferenced by this crate.
#[repr(C)]
pub struct JNINativeInterface_ {
    _private: [u8; 0],
}

/// JNIEnv is directly the vtable pointer (C ABI definition)
pub type JNIEnv = *const JNINativeInterface_;

// =============================================================================
// JNIInvokeInterface_ - The JavaVM function table
// =============================================================================

pub type JavaVmDestroyFn = unsafe extern "system" fn(vm: *mut JavaVM) -> jint;
pub type JavaVmAttachFn =
    unsafe extern "system" fn(vm: *mut JavaVM, penv: *mut *mut c_void, args: *mut c_void) -> jint;
pub type JavaVmDetachFn = unsafe extern "system" fn(vm: *mut JavaVM) -> jint;
pub type JavaVmGetEnvFn =
    unsafe extern "system" fn(vm: *mut JavaVM, penv: *mut *mut c_void, version: jint) -> jint;

#[repr(C)]
pub struct JNIInvokeInterface_ {
    pub reserved0: *mut c_void,
    pub reserved1: *mut c_void,
    pub reserved2: *mut c_void,

    pub DestroyJavaVM: JavaVmDestroyFn,
    pub AttachCurrentThread: JavaVmAttachFn,
    pub DetachCurrentThread: JavaVmDetachFn,
    pub GetEnv: JavaVmGetEnvFn,
    pub AttachCurrentThreadAsDaemon: JavaVmAttachFn,
}

// =============================================================================
// JavaVM - Pointer to the JavaVM function table
// =============================================================================
//
// In C JNI, JavaVM is directly a pointer to the vtable:
//   typedef const struct JNIInvokeInterface_ *JavaVM;
// =============================================================================

/// JavaVM is directly the vtable pointer (C ABI definition)
pub type JavaVM = *const JNIInvokeInterface_;

/// Helper to call JavaVM functions through the vtable.
/// vm_ptr: *mut JavaVM = *mut *const JNIInvokeInterface_
/// *vm_ptr: *const JNIInvokeInterface_ (vtable pointer)
/// **vm_ptr: JNIInvokeInterface_ (vtable itself)
#[macro_export]
macro_rules! jvm_call {
    ($vm:expr, $func:ident $(, $args:expr)*) => {{
        let vm_ptr = $vm;
        ((**vm_ptr).$func)(vm_ptr $(, $args)*)
    }};
}
