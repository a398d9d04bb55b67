// Counter sources - platform performance counter access
//
// The target exposes retired instructions and cycles through the standard
// rdinstret/rdcycle counters and the remaining events through custom CSRs:
//   0xc04          mispredicted branches
//   0xc09 / 0xc0a  L1 data cache miss pair
//   0xc0b / 0xc0c  L1 instruction cache miss pair
//   0xc0d / 0xc0e  L2 cache miss pair
//
// All values are cumulative and monotonically increasing; windowing is the
// harness's job. Hosts without these counters get the null source, which
// degrades every derived metric to zero rather than failing presentation.

/// Access to the hardware performance counters.
///
/// Each pair counter returns the raw `[start, end]` CSR values for one cache
/// level; the miss count over a window is the delta of `end` minus the delta
/// of `start`.
pub trait CounterSource {
    /// Cumulative retired-instruction count
    fn instructions_retired(&mut self) -> u64;

    /// Cumulative cycle count
    fn cycles(&mut self) -> u64;

    /// Cumulative mispredicted-branch count
    fn branch_mispredictions(&mut self) -> u64;

    /// L1 data cache miss pair
    fn l1d_pair(&mut self) -> [u64; 2];

    /// L1 instruction cache miss pair
    fn l1i_pair(&mut self) -> [u64; 2];

    /// L2 cache miss pair
    fn l2_pair(&mut self) -> [u64; 2];
}

/// Counter source for targets without performance counters.
///
/// Returns zero everywhere, so sampled metrics report zero/NaN instead of
/// aborting presentation.
pub struct NullCounters;

impl CounterSource for NullCounters {
    fn instructions_retired(&mut self) -> u64 {
        0
    }

    fn cycles(&mut self) -> u64 {
        0
    }

    fn branch_mispredictions(&mut self) -> u64 {
        0
    }

    fn l1d_pair(&mut self) -> [u64; 2] {
        [0, 0]
    }

    fn l1i_pair(&mut self) -> [u64; 2] {
        [0, 0]
    }

    fn l2_pair(&mut self) -> [u64; 2] {
        [0, 0]
    }
}

/// CSR-backed counter source for the RISC-V deployment target.
#[cfg(target_arch = "riscv64")]
pub struct RiscvCounters;

#[cfg(target_arch = "riscv64")]
macro_rules! csr_read {
    ($csr:literal) => {{
        let v: u64;
        unsafe {
            core::arch::asm!(
                concat!("csrr {v}, ", $csr),
                v = out(reg) v,
                options(nostack, nomem),
            );
        }
        v
    }};
}

#[cfg(target_arch = "riscv64")]
impl CounterSource for RiscvCounters {
    fn instructions_retired(&mut self) -> u64 {
        csr_read!("instret")
    }

    fn cycles(&mut self) -> u64 {
        csr_read!("cycle")
    }

    fn branch_mispredictions(&mut self) -> u64 {
        csr_read!("0xc04")
    }

    fn l1d_pair(&mut self) -> [u64; 2] {
        [csr_read!("0xc09"), csr_read!("0xc0a")]
    }

    fn l1i_pair(&mut self) -> [u64; 2] {
        [csr_read!("0xc0b"), csr_read!("0xc0c")]
    }

    fn l2_pair(&mut self) -> [u64; 2] {
        [csr_read!("0xc0d"), csr_read!("0xc0e")]
    }
}

/// Pick the counter source for the current target.
pub fn default_counters() -> Box<dyn CounterSource> {
    #[cfg(target_arch = "riscv64")]
    {
        Box::new(RiscvCounters)
    }
    #[cfg(not(target_arch = "riscv64"))]
    {
        Box::new(NullCounters)
    }
}
