use bitfield::bitfield;

/// SD Status block.
pub type SsrData = [u8; 64];

bitfield! {
    /// SD Status register.
    ///
    /// Holds bits 511..384 of the block, the rest is reserved.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Ssr(u128);
    impl Debug;
    /// 0 is 1-bit bus, 2 is 4-bit bus.
    pub u8, dat_bus_width, _: 127, 126;
    pub secured_mode, _: 125;
    pub u16, sd_card_type, _: 111, 96;
    pub u32, size_of_protected_area, _: 95, 64;
    pub u8, speed_class, _: 63, 56;
    pub u8, performance_move, _: 55, 48;
    pub u8, au_size, _: 47, 44;
    pub u16, erase_size, _: 39, 24;
    pub u8, erase_timeout, _: 23, 18;
    pub u8, erase_offset, _: 17, 16;
    pub u8, uhs_speed_grade, _: 15, 12;
    pub u8, uhs_au_size, _: 11, 8;
    pub u8, video_speed_class, _: 7, 0;
}

impl Ssr {
    /// Speed class in MB/s, `None` for reserved codes.
    pub fn speed_class_mbps(&self) -> Option<u8> {
        match self.speed_class() {
            0 => Some(0),
            1 => Some(2),
            2 => Some(4),
            3 => Some(6),
            4 => Some(10),
            _ => None,
        }
    }

    /// Allocation unit size in bytes, `None` if not defined.
    pub fn allocation_unit_bytes(&self) -> Option<u32> {
        match self.au_size() {
            0 => None,
            size @ 1..=10 => Some(16 * 1024 << (size - 1)),
            11 => Some(12 * 1024 * 1024),
            12 => Some(16 * 1024 * 1024),
            13 => Some(24 * 1024 * 1024),
            14 => Some(32 * 1024 * 1024),
            _ => Some(64 * 1024 * 1024),
        }
    }
}

impl From<SsrData> for Ssr {
    fn from(ssr_data: SsrData) -> Self {
        let mut head = [0; 16];
        head.copy_from_slice(&ssr_data[..16]);

        Ssr(u128::from_be_bytes(head))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn class10_ssr() {
        let mut data = [0; 64];
        data[..16].copy_from_slice(&hex!("80 00 00 00 00 04 00 00 04 00 90 00 0F 05 00 00"));
        let ssr = Ssr::from(data);

        assert_eq!(ssr.dat_bus_width(), 2);
        assert!(!ssr.secured_mode());
        assert_eq!(ssr.sd_card_type(), 0);
        assert_eq!(ssr.size_of_protected_area(), 0x0004_0000);
        assert_eq!(ssr.speed_class(), 4);
        assert_eq!(ssr.speed_class_mbps(), Some(10));
        assert_eq!(ssr.performance_move(), 0);
        assert_eq!(ssr.au_size(), 9);
        assert_eq!(ssr.allocation_unit_bytes(), Some(4 * 1024 * 1024));
        assert_eq!(ssr.erase_size(), 0x000F);
        assert_eq!(ssr.erase_timeout(), 1);
        assert_eq!(ssr.erase_offset(), 1);
        assert_eq!(ssr.uhs_speed_grade(), 0);
    }

    #[test]
    fn tail_is_ignored() {
        let mut data = [0xFF; 64];
        data[..16].fill(0);

        assert_eq!(Ssr::from(data), Ssr(0));
    }
}
