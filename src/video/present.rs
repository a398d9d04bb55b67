// Conversion loop - indexed pixels to packed texels, two per 64-bit store
//
// The hot path of the backend. Walks the logical surface in 16-pixel blocks,
// issuing a software read prefetch one block ahead of the cursor; the target
// has no aggressive hardware prefetcher and the loop is memory-bound.
// Volatile stores plus compiler fences pin the intended read/write/prefetch
// ordering against compiler reordering only; cross-thread visibility is the
// external consumer's problem.

use std::sync::atomic::{compiler_fence, Ordering};

use super::palette::PALETTE_SIZE;

/// Source pixels processed per block
pub const BLOCK_PIXELS: usize = 16;

// Prefetch distance in bytes: one block ahead of the block being read
const PREFETCH_AHEAD: usize = 3 * BLOCK_PIXELS;

/// Read prefetch hint. Falls back to a volatile touch on targets without a
/// prefetch instruction, which is why callers keep the address in bounds.
#[inline(always)]
fn prefetch_read(addr: *const u8) {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        core::arch::x86_64::_mm_prefetch(addr as *const i8, core::arch::x86_64::_MM_HINT_T2);
    }
    #[cfg(target_arch = "aarch64")]
    unsafe {
        core::arch::asm!(
            "prfm pldl1keep, [{addr}]",
            addr = in(reg) addr,
            options(nostack, preserves_flags),
        );
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    unsafe {
        let _ = core::ptr::read_volatile(addr);
    }
}

/// Convert an indexed surface into packed texels.
///
/// Adjacent pixel pairs are looked up in `lut` and combined into one 64-bit
/// store; an odd trailing pixel gets a single 32-bit store.
///
/// # Safety
/// `dst` must be valid for `src.len() * 4` bytes of writes and 8-byte
/// aligned. It must not overlap `src`.
pub unsafe fn pack_indexed(src: &[u8], lut: &[u32; PALETTE_SIZE], dst: *mut u64) {
    let n = src.len();
    if n == 0 {
        return;
    }

    prefetch_read(src.as_ptr());
    if n > BLOCK_PIXELS {
        prefetch_read(src.as_ptr().add(BLOCK_PIXELS));
    }
    if n > 2 * BLOCK_PIXELS {
        prefetch_read(src.as_ptr().add(2 * BLOCK_PIXELS));
    }

    let mut out = dst;
    let mut ii = 0;

    while ii + BLOCK_PIXELS <= n {
        prefetch_read(src.as_ptr().add((ii + PREFETCH_AHEAD).min(n - 1)));
        compiler_fence(Ordering::SeqCst);

        let mut i = ii;
        while i < ii + BLOCK_PIXELS {
            let lo = lut[src[i] as usize] as u64;
            let hi = lut[src[i + 1] as usize] as u64;
            out.write_volatile(lo | (hi << 32));
            out = out.add(1);
            i += 2;
        }
        ii += BLOCK_PIXELS;
    }

    // Tail for surfaces that are not a multiple of one block
    while ii + 2 <= n {
        let lo = lut[src[ii] as usize] as u64;
        let hi = lut[src[ii + 1] as usize] as u64;
        out.write_volatile(lo | (hi << 32));
        out = out.add(1);
        ii += 2;
    }
    if ii < n {
        (out as *mut u32).write_volatile(lut[src[ii] as usize]);
    }

    compiler_fence(Ordering::SeqCst);
}

/// Safe wrapper converting into a u64 slice.
///
/// # Panics
/// Panics if `dst` cannot hold `src.len()` texels.
pub fn pack_indexed_into(src: &[u8], lut: &[u32; PALETTE_SIZE], dst: &mut [u64]) {
    assert!(
        dst.len() * 2 >= src.len(),
        "Destination too small for packed conversion"
    );
    unsafe { pack_indexed(src, lut, dst.as_mut_ptr()) }
}
