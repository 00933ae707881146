// force-gc-agent/src/sys/jvmti.rs
//
// The slice of the JVMTI (JVM Tool Interface) ABI this agent touches.
//
// The function table is 156 pointer-sized slots in jvmti.h, numbered from 1.
// Only the slots this agent calls are named; the rest are kept as opaque
// padding so the named ones land at the right offsets:
//   -  88: GetVersionNumber
//   - 108: ForceGarbageCollection

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::os::raw::c_void;
use std::ptr;

use crate::sys::jni::jint;

// --- Versions ---
pub const JVMTI_VERSION_1_0: jint = 0x30010000;
pub const JVMTI_VERSION_1_1: jint = 0x30010100;
pub const JVMTI_VERSION_1_2: jint = 0x30010200;
pub const JVMTI_VERSION_9: jint = 0x30090000;
pub const JVMTI_VERSION_11: jint = 0x300B0000;
pub const JVMTI_VERSION_21: jint = 0x30150000;

pub const JVMTI_VERSION_MASK_MAJOR: jint = 0x0FFF0000;
pub const JVMTI_VERSION_MASK_MINOR: jint = 0x0000FF00;
pub const JVMTI_VERSION_MASK_MICRO: jint = 0x000000FF;
pub const JVMTI_VERSION_SHIFT_MAJOR: u32 = 16;
pub const JVMTI_VERSION_SHIFT_MINOR: u32 = 8;

// --- Error Codes ---
//
// A plain integer rather than an enum: the VM may hand back any code, and the
// relay returns it to Java untouched.
pub type jvmtiError = u32;

pub const JVMTI_ERROR_NONE: jvmtiError = 0;
pub const JVMTI_ERROR_INVALID_THREAD: jvmtiError = 10;
pub const JVMTI_ERROR_NOT_AVAILABLE: jvmtiError = 98;
pub const JVMTI_ERROR_MUST_POSSESS_CAPABILITY: jvmtiError = 99;
pub const JVMTI_ERROR_NULL_POINTER: jvmtiError = 100;
pub const JVMTI_ERROR_OUT_OF_MEMORY: jvmtiError = 110;
pub const JVMTI_ERROR_ACCESS_DENIED: jvmtiError = 111;
pub const JVMTI_ERROR_WRONG_PHASE: jvmtiError = 112;
pub const JVMTI_ERROR_INTERNAL: jvmtiError = 113;
pub const JVMTI_ERROR_UNATTACHED_THREAD: jvmtiError = 115;
pub const JVMTI_ERROR_INVALID_ENVIRONMENT: jvmtiError = 116;

// --- Function Types ---
pub type JvmtiGetVersionNumberFn =
    unsafe extern "system" fn(env: *mut jvmtiEnv, version_ptr: *mut jint) -> jvmtiError;
pub type JvmtiForceGarbageCollectionFn = unsafe extern "system" fn(env: *mut jvmtiEnv) -> jvmtiError;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct jvmtiInterface_1_ {
    /*   1-87 */
    pub slots_1_87: [*mut c_void; 87],
    /*   88: Get Version Number */
    pub GetVersionNumber: Option<JvmtiGetVersionNumberFn>,
    /*   89-107 */
    pub slots_89_107: [*mut c_void; 19],
    /*  108: Force Garbage Collection */
    pub ForceGarbageCollection: Option<JvmtiForceGarbageCollectionFn>,
    /*  109-156 */
    pub slots_109_156: [*mut c_void; 48],
}

impl Default for jvmtiInterface_1_ {
    fn default() -> Self {
        jvmtiInterface_1_ {
            slots_1_87: [ptr::null_mut(); 87],
            GetVersionNumber: None,
            slots_89_107: [ptr::null_mut(); 19],
            ForceGarbageCollection: None,
            slots_109_156: [ptr::null_mut(); 48],
        }
    }
}

#[repr(C)]
pub struct jvmtiEnv {
    pub functions: *const jvmtiInterface_1_,
}
