use bitfield::bitfield;

/// SD Configuration block.
pub type ScrData = [u8; 8];

bitfield! {
    /// SD Configuration register.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Scr(u64);
    impl Debug;
    pub u8, structure_version, _: 63, 60;
    pub u8, sd_spec, _: 59, 56;
    pub data_status_after_erase, _: 55;
    pub u8, sd_security, _: 54, 52;
    /// Bit 0 is 1-bit bus, bit 2 is 4-bit bus.
    pub u8, sd_bus_widths, _: 51, 48;
    pub sd_spec3, _: 47;
    pub u8, ex_security, _: 46, 43;
    pub sd_spec4, _: 42;
    pub u8, sd_specx, _: 41, 38;
    pub u8, cmd_support, _: 35, 32;
}

impl Scr {
    /// Physical layer specification version as (major, minor).
    pub fn spec_version(&self) -> (u8, u8) {
        match (self.sd_spec(), self.sd_spec3(), self.sd_spec4(), self.sd_specx()) {
            (0, _, _, _) => (1, 0),
            (1, _, _, _) => (1, 1),
            (2, false, _, _) => (2, 0),
            (2, true, false, 0) => (3, 0),
            (2, true, true, 0) => (4, 0),
            (2, true, _, 1) => (5, 0),
            (2, true, _, 2) => (6, 0),
            (2, true, _, 3) => (7, 0),
            (2, true, _, 4) => (8, 0),
            (2, true, _, 5) => (9, 0),
            _ => (0, 0),
        }
    }

    /// Card supports 4-bit bus.
    pub fn supports_4bit_bus(&self) -> bool {
        self.sd_bus_widths() & 0b0100 != 0
    }
}

impl From<ScrData> for Scr {
    fn from(scr_data: ScrData) -> Self {
        Scr(u64::from_be_bytes(scr_data))
    }
}
