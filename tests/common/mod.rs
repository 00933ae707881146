// A fake JVM: a JNIInvokeInterface_ whose GetEnv hands out a jvmtiEnv with a
// counting ForceGarbageCollection.
#![allow(dead_code)]

use std::ffi::c_void;
use std::ptr;
use std::sync::atomic::{AtomicI32, AtomicU32, AtomicUsize, Ordering};
use std::sync::OnceLock;

use force_gc_agent::sys::jni::{self, jint, JNIInvokeInterface_, JavaVM};
use force_gc_agent::sys::jvmti::{self, jvmtiEnv, jvmtiError, jvmtiInterface_1_};

pub static GET_ENV_CALLS: AtomicUsize = AtomicUsize::new(0);
pub static GC_CALLS: AtomicUsize = AtomicUsize::new(0);

static GET_ENV_RESULT: AtomicI32 = AtomicI32::new(jni::JNI_OK);
static GC_STATUS: AtomicU32 = AtomicU32::new(jvmti::JVMTI_ERROR_NONE);

/// Makes every later GetEnv call fail with `code`.
pub fn refuse_get_env(code: jint) {
    GET_ENV_RESULT.store(code, Ordering::SeqCst);
}

pub fn set_gc_status(status: jvmtiError) {
    GC_STATUS.store(status, Ordering::SeqCst);
}

unsafe extern "system" fn fake_get_env(_vm: *mut JavaVM, penv: *mut *mut c_void, _version: jint) -> jint {
    GET_ENV_CALLS.fetch_add(1, Ordering::SeqCst);
    let code = GET_ENV_RESULT.load(Ordering::SeqCst);
    if code != jni::JNI_OK {
        return code;
    }
    *penv = fake_jvmti_env() as *mut c_void;
    jni::JNI_OK
}

unsafe extern "system" fn fake_force_gc(_env: *mut jvmtiEnv) -> jvmtiError {
    GC_CALLS.fetch_add(1, Ordering::SeqCst);
    GC_STATUS.load(Ordering::SeqCst)
}

unsafe extern "system" fn fake_version(_env: *mut jvmtiEnv, version_ptr: *mut jint) -> jvmtiError {
    *version_ptr = jvmti::JVMTI_VERSION_1_1;
    jvmti::JVMTI_ERROR_NONE
}

unsafe extern "system" fn unsupported(_vm: *mut JavaVM) -> jint {
    jni::JNI_ERR
}

unsafe extern "system" fn unsupported_attach(_vm: *mut JavaVM, _penv: *mut *mut c_void, _args: *mut c_void) -> jint {
    jni::JNI_ERR
}

/// The single jvmtiEnv handed out by the fake VM.
pub fn fake_jvmti_env() -> *mut jvmtiEnv {
    static ENV: OnceLock<usize> = OnceLock::new();
    *ENV.get_or_init(|| {
        let table: &'static jvmtiInterface_1_ = Box::leak(Box::new(jvmtiInterface_1_ {
            GetVersionNumber: Some(fake_version),
            ForceGarbageCollection: Some(fake_force_gc),
            ..Default::default()
        }));
        let env = Box::leak(Box::new(jvmtiEnv { functions: table }));
        env as *mut jvmtiEnv as usize
    }) as *mut jvmtiEnv
}

pub fn fake_vm() -> *mut JavaVM {
    let table: &'static JNIInvokeInterface_ = Box::leak(Box::new(JNIInvokeInterface_ {
        reserved0: ptr::null_mut(),
        reserved1: ptr::null_mut(),
        reserved2: ptr::null_mut(),
        DestroyJavaVM: unsupported,
        AttachCurrentThread: unsupported_attach,
        DetachCurrentThread: unsupported,
        GetEnv: fake_get_env,
        AttachCurrentThreadAsDaemon: unsupported_attach,
    }));
    Box::leak(Box::new(table as JavaVM))
}

pub fn options(s: &str) -> std::ffi::CString {
    std::ffi::CString::new(s).expect("options without NUL")
}
