//! Raw FFI declarations. Everything here mirrors `jni.h` / `jvmti.h`.

pub mod jni;
pub mod jvmti;
