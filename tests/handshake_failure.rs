// A JVM that refuses the JVMTI version: the load degrades instead of failing.

mod common;

use std::ptr;
use std::sync::atomic::Ordering;

use force_gc_agent::agent::{collections_forced, GC_BRIDGE, STATUS_NOT_INITIALIZED};
use force_gc_agent::sys::jni;
use force_gc_agent::{Agent_OnLoad, Java_mikenakis_Garbager_forceGarbageCollection};

#[test]
fn refused_handshake_leaves_agent_loaded_but_inert() {
    common::refuse_get_env(jni::JNI_EVERSION);

    // A bad option value falls back to defaults rather than failing the load.
    let opts = common::options("version=8");
    let rc = unsafe { Agent_OnLoad(common::fake_vm(), opts.as_ptr() as *mut _, ptr::null_mut()) };
    assert_eq!(rc, jni::JNI_OK);

    assert!(GC_BRIDGE.is_initialized());
    assert!(!GC_BRIDGE.is_ready());

    let status = Java_mikenakis_Garbager_forceGarbageCollection(ptr::null_mut(), ptr::null_mut());
    assert_eq!(status, STATUS_NOT_INITIALIZED);
    assert_eq!(common::GC_CALLS.load(Ordering::SeqCst), 0);
    assert_eq!(collections_forced(), 0);

    // The refusal is final for this process, even once the VM would accept.
    common::refuse_get_env(jni::JNI_OK);
    let rc = unsafe { Agent_OnLoad(common::fake_vm(), ptr::null_mut(), ptr::null_mut()) };
    assert_eq!(rc, jni::JNI_OK);
    assert_eq!(common::GET_ENV_CALLS.load(Ordering::SeqCst), 1);
    assert!(!GC_BRIDGE.is_ready());
}
