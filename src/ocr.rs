use bitfield::bitfield;

bitfield! {
    /// Operation Conditions Register.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Ocr(u32);
    impl Debug;
    /// Card power up status, `false` while the card is busy.
    pub power_up_status, _: 31;
    /// Card capacity status, `true` for block addressed (SDHC/SDXC) cards.
    pub card_capacity_status, _: 30;
    pub uhs2_card_status, _: 29;
    pub switching_to_18v_accepted, _: 24;
    /// VDD voltage window, bit 19 is 3.6-3.5V down to bit 0 for 1.7-1.6V.
    pub u32, vdd_voltage_window, _: 23, 4;
}

impl Ocr {
    /// Highest window upper bound, in 0.1V.
    const WINDOW_TOP: u8 = 36;
    /// Lowest window upper bound, in 0.1V.
    const WINDOW_BOTTOM: u8 = 17;

    /// Whether the window `upper - 0.1V .. upper` is supported, `upper` in 0.1V (17..=36).
    pub fn supports_window(&self, upper: u8) -> bool {
        if !(Self::WINDOW_BOTTOM..=Self::WINDOW_TOP).contains(&upper) {
            return false;
        }

        let bit = 19 - u32::from(Self::WINDOW_TOP - upper);
        self.vdd_voltage_window() & (1 << bit) != 0
    }

    /// Card addresses data by block index rather than by byte offset.
    pub fn is_block_addressed(&self) -> bool {
        self.card_capacity_status()
    }
}

impl From<u32> for Ocr {
    fn from(value: u32) -> Self {
        Ocr(value)
    }
}

impl From<[u8; 4]> for Ocr {
    fn from(data: [u8; 4]) -> Self {
        Ocr(u32::from_be_bytes(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdhc_ready() {
        let ocr = Ocr::from([0xC0u8, 0xFF, 0x80, 0x00]);

        assert!(ocr.power_up_status());
        assert!(ocr.card_capacity_status());
        assert!(ocr.is_block_addressed());
        assert!(!ocr.switching_to_18v_accepted());
        // 2.7-3.6V
        assert_eq!(ocr.vdd_voltage_window(), 0x0F_F800);
        assert!(ocr.supports_window(36));
        assert!(ocr.supports_window(33));
        assert!(ocr.supports_window(28));
        assert!(!ocr.supports_window(27));
        assert!(!ocr.supports_window(18));
    }

    #[test]
    fn standard_capacity_busy() {
        let ocr = Ocr::from(0x00FF_8000u32);

        assert!(!ocr.power_up_status());
        assert!(!ocr.is_block_addressed());
    }

    #[test]
    fn window_bounds() {
        let ocr = Ocr::from(0x00FF_FFF0u32);

        assert!(ocr.supports_window(17));
        assert!(ocr.supports_window(36));
        assert!(!ocr.supports_window(16));
        assert!(!ocr.supports_window(37));
    }
}
