//! 6502 family members the core can model.

/// Which member of the 6502 family the dispatch table describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Original NMOS 6502 with decimal-mode ADC/SBC.
    #[default]
    Nmos6502,
    /// Ricoh 2A03/2A07 (NES/Famicom). The D flag is stored and can be set
    /// or cleared, but ADC/SBC always use binary arithmetic.
    Ricoh2A03,
}

impl Variant {
    /// Whether ADC/SBC honour the D flag.
    #[must_use]
    pub const fn has_decimal_mode(self) -> bool {
        matches!(self, Self::Nmos6502)
    }
}
