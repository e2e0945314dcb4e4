//! CPU error type.

use thiserror::Error;

/// Failure raised by a single cycle.
///
/// `E` is the error type of the bus the CPU was stepped with; bus failures
/// are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpuError<E> {
    /// The byte fetched at `pc` has no dispatch table entry. The CPU stays
    /// jammed until it is reset.
    #[error("invalid opcode ${opcode:02X} at ${pc:04X}")]
    InvalidOpcode { opcode: u8, pc: u16 },

    /// The bus rejected an access.
    #[error("bus access failed")]
    Bus(#[source] E),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn invalid_opcode_message() {
        let err: CpuError<Infallible> = CpuError::InvalidOpcode {
            opcode: 0x02,
            pc: 0x8000,
        };
        assert_eq!(err.to_string(), "invalid opcode $02 at $8000");
    }
}
