// Rejects SIMD cfgs forced through `RUSTFLAGS` past the build script.
//
// Kept free of crate paths so it also builds as a standalone crate root.

#[cfg(all(swiss_simd_extended, not(swiss_simd_base)))]
compile_error!("bad configuration: SSSE3 implies SSE2");

#[cfg(all(swiss_simd_base, not(any(target_arch = "x86", target_arch = "x86_64"))))]
compile_error!("bad configuration: SSE2 requested for a non-x86 target");
