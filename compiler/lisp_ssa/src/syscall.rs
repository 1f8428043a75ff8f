//! Raw system call conventions.
//!
//! `sys_write` lowers to inline assembly that traps straight into the
//! kernel. The convention is fixed when the compiler is built, from the
//! platform the compiler itself runs on.

/// A kernel calling convention for `write`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyscallAbi {
    /// macOS on Apple silicon: number in `x16`, trap with `svc #0x80`.
    DarwinAarch64,
    /// Linux on x86-64: number in `rax`, `syscall` clobbers `rcx`/`r11`.
    LinuxX86_64,
    /// Linux on aarch64: number in `x8`, trap with `svc #0`.
    LinuxAarch64,
}

impl SyscallAbi {
    /// The convention of the host. Anything unrecognized falls back to
    /// Linux x86-64.
    pub fn host() -> Self {
        if cfg!(all(target_os = "macos", target_arch = "aarch64")) {
            SyscallAbi::DarwinAarch64
        } else if cfg!(all(target_os = "linux", target_arch = "aarch64")) {
            SyscallAbi::LinuxAarch64
        } else {
            SyscallAbi::LinuxX86_64
        }
    }

    /// Syscall number of `write`.
    pub fn write_number(self) -> i64 {
        match self {
            SyscallAbi::DarwinAarch64 => 4,
            SyscallAbi::LinuxX86_64 => 1,
            SyscallAbi::LinuxAarch64 => 64,
        }
    }

    /// Trap instruction.
    pub fn asm(self) -> &'static str {
        match self {
            SyscallAbi::DarwinAarch64 => "svc #0x80",
            SyscallAbi::LinuxX86_64 => "syscall",
            SyscallAbi::LinuxAarch64 => "svc #0",
        }
    }

    /// Constraint string. Inputs are always `(number, fd, buf, len)`.
    pub fn constraints(self) -> &'static str {
        match self {
            SyscallAbi::DarwinAarch64 => "={x0},{x16},{x0},{x1},{x2},~{memory}",
            SyscallAbi::LinuxX86_64 => "={rax},{rax},{rdi},{rsi},{rdx},~{rcx},~{r11},~{memory}",
            SyscallAbi::LinuxAarch64 => "={x0},{x8},{x0},{x1},{x2},~{memory}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_numbers() {
        assert_eq!(SyscallAbi::DarwinAarch64.write_number(), 4);
        assert_eq!(SyscallAbi::LinuxX86_64.write_number(), 1);
        assert_eq!(SyscallAbi::LinuxAarch64.write_number(), 64);
    }

    #[test]
    fn constraints_bind_four_inputs() {
        for abi in [
            SyscallAbi::DarwinAarch64,
            SyscallAbi::LinuxX86_64,
            SyscallAbi::LinuxAarch64,
        ] {
            let inputs = abi
                .constraints()
                .split(',')
                .filter(|c| c.starts_with('{'))
                .count();
            assert_eq!(inputs, 4, "{abi:?}");
        }
    }

    #[test]
    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    fn host_is_linux_x86_64() {
        assert_eq!(SyscallAbi::host(), SyscallAbi::LinuxX86_64);
    }
}
