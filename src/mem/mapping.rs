// Mapped buffer - anonymous mmap-backed allocation with huge-page fallback
//
// The conversion loop streams through both surfaces every frame, so large
// mappings are requested with MAP_HUGETLB first to cut TLB pressure. Huge
// pages are not guaranteed on every deployment; a failed attempt falls back
// to a standard anonymous mapping.

use std::ptr::NonNull;

use crate::error::VideoError;

/// An owned anonymous memory mapping, unmapped on drop.
pub struct MappedBuffer {
    ptr: NonNull<u8>,
    len: usize,
    huge: bool,
}

impl MappedBuffer {
    /// Map `len` bytes of zeroed anonymous memory.
    ///
    /// Mappings larger than one page are first attempted with MAP_HUGETLB;
    /// if the kernel refuses (no huge pages configured, pool exhausted), a
    /// plain anonymous mapping is used instead.
    ///
    /// # Errors
    /// Returns `VideoError::OutOfMemory` if both attempts fail.
    pub fn map(len: usize) -> Result<Self, VideoError> {
        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) } as usize;

        let mut ptr = std::ptr::null_mut();
        let mut huge = false;

        if len > page_size {
            ptr = unsafe { Self::mmap_anon(len, libc::MAP_HUGETLB) };
            huge = !ptr.is_null() && ptr != libc::MAP_FAILED;
        }

        if ptr.is_null() || ptr == libc::MAP_FAILED {
            ptr = unsafe { Self::mmap_anon(len, 0) };
            huge = false;
        }

        if ptr.is_null() || ptr == libc::MAP_FAILED {
            return Err(VideoError::OutOfMemory { size: len });
        }

        Ok(MappedBuffer {
            // MAP_FAILED and null are both rejected above
            ptr: unsafe { NonNull::new_unchecked(ptr as *mut u8) },
            len,
            huge,
        })
    }

    unsafe fn mmap_anon(len: usize, extra_flags: libc::c_int) -> *mut libc::c_void {
        libc::mmap(
            std::ptr::null_mut(),
            len,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_ANONYMOUS | libc::MAP_PRIVATE | extra_flags,
            -1,
            0,
        )
    }

    /// Length of the mapping in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the mapping ended up backed by huge pages.
    pub fn is_huge(&self) -> bool {
        self.huge
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub fn as_slice(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Backing physical address of the mapping, where the platform exposes a
    /// translation call. Informational only; `None` on hosts without one.
    #[cfg(target_arch = "riscv64")]
    pub fn physical_address(&self) -> Option<u64> {
        // Platform translation ecall: a7 = 257, a0 = virtual address.
        let pa: u64;
        unsafe {
            core::arch::asm!(
                "ecall",
                in("a7") 257u64,
                inout("a0") self.ptr.as_ptr() as u64 => pa,
                options(nostack),
            );
        }
        Some(pa)
    }

    #[cfg(not(target_arch = "riscv64"))]
    pub fn physical_address(&self) -> Option<u64> {
        None
    }
}

impl Drop for MappedBuffer {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.ptr.as_ptr() as *mut libc::c_void, self.len);
        }
    }
}
