use crate::consts::BLOCK_SIZE_U64;

use bitfield::bitfield;
use size::{consts::KiB, Size};

/// Card Specific Data block.
pub type CsdData = [u8; 16];

bitfield! {
    /// Card Specific Data, version 1.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct CsdV1(u128);
    impl Debug;
    pub u8, version, _: 127, 126;
    pub u8, data_read_access_time1, _: 119, 112;
    pub u8, data_read_access_time2, _: 111, 104;
    pub u8, max_data_transfer_rate, _: 103, 96;
    pub u16, card_command_classes, _: 95, 84;
    pub u8, read_block_length, _: 83, 80;
    pub read_partial_blocks, _: 79;
    pub write_block_misalignment, _: 78;
    pub read_block_misalignment, _: 77;
    pub dsr_implemented, _: 76;
    pub u16, device_size, _: 73, 62;
    pub u8, max_read_current_vdd_min, _: 61, 59;
    pub u8, max_read_current_vdd_max, _: 58, 56;
    pub u8, max_write_current_vdd_min, _: 55, 53;
    pub u8, max_write_current_vdd_max, _: 52, 50;
    pub u8, device_size_multiplier, _: 49, 47;
    pub erase_single_block_enabled, _: 46;
    pub u8, erase_sector_size, _: 45, 39;
    pub u8, write_protect_group_size, _: 38, 32;
    pub write_protect_group_enable, _: 31;
    pub u8, write_speed_factor, _: 28, 26;
    pub u8, max_write_data_length, _: 25, 22;
    pub write_partial_blocks_allowed, _: 21;
    pub file_format_group, _: 15;
    pub copy_flag, _: 14;
    pub permanent_write_protection, _: 13;
    pub temporary_write_protection, _: 12;
    pub u8, file_format, _: 11, 10;
    pub u8, crc, _: 7, 1;
}

bitfield! {
    /// Card Specific Data, version 2.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct CsdV2(u128);
    impl Debug;
    pub u8, version, _: 127, 126;
    pub u8, data_read_access_time1, _: 119, 112;
    pub u8, data_read_access_time2, _: 111, 104;
    pub u8, max_data_transfer_rate, _: 103, 96;
    pub u16, card_command_classes, _: 95, 84;
    pub u8, read_block_length, _: 83, 80;
    pub read_partial_blocks, _: 79;
    pub write_block_misalignment, _: 78;
    pub read_block_misalignment, _: 77;
    pub dsr_implemented, _: 76;
    pub u32, device_size, _: 69, 48;
    pub erase_single_block_enabled, _: 46;
    pub u8, erase_sector_size, _: 45, 39;
    pub u8, write_protect_group_size, _: 38, 32;
    pub write_protect_group_enable, _: 31;
    pub u8, write_speed_factor, _: 28, 26;
    pub u8, max_write_data_length, _: 25, 22;
    pub write_partial_blocks_allowed, _: 21;
    pub file_format_group, _: 15;
    pub copy_flag, _: 14;
    pub permanent_write_protection, _: 13;
    pub temporary_write_protection, _: 12;
    pub u8, file_format, _: 11, 10;
    pub u8, crc, _: 7, 1;
}

/// Card Specific Data, generic container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Csd {
    V1(CsdV1),
    V2(CsdV2),
}

/// Represents capacity provider.
pub trait CapacityProvider {
    /// Returns the card capacity in bytes.
    fn card_capacity(&self) -> Size;

    /// Returns the card capacity in 512-byte blocks.
    fn card_capacity_blocks(&self) -> u64;
}

impl From<CsdData> for CsdV1 {
    fn from(csd_data: CsdData) -> Self {
        CsdV1(u128::from_be_bytes(csd_data))
    }
}

impl From<CsdData> for CsdV2 {
    fn from(csd_data: CsdData) -> Self {
        CsdV2(u128::from_be_bytes(csd_data))
    }
}

impl From<CsdData> for Csd {
    /// Picks the layout by the CSD_STRUCTURE field.
    fn from(csd_data: CsdData) -> Self {
        match csd_data[0] >> 6 {
            0 => Csd::V1(CsdV1::from(csd_data)),
            _ => Csd::V2(CsdV2::from(csd_data)),
        }
    }
}

impl CapacityProvider for CsdV1 {
    fn card_capacity(&self) -> Size {
        let shift = self.device_size_multiplier() + self.read_block_length() + 2;
        Size::from_bytes((u64::from(self.device_size()) + 1) << shift)
    }

    fn card_capacity_blocks(&self) -> u64 {
        (u64::from(self.device_size()) + 1)
            << (self.device_size_multiplier() + self.read_block_length() - 7)
    }
}

impl CapacityProvider for CsdV2 {
    fn card_capacity(&self) -> Size {
        Size::from_bytes(self.card_capacity_blocks() * BLOCK_SIZE_U64)
    }

    fn card_capacity_blocks(&self) -> u64 {
        (u64::from(self.device_size()) + 1) * (KiB as u64)
    }
}

impl CapacityProvider for Csd {
    fn card_capacity(&self) -> Size {
        match self {
            Csd::V1(csd) => csd.card_capacity(),
            Csd::V2(csd) => csd.card_capacity(),
        }
    }

    fn card_capacity_blocks(&self) -> u64 {
        match self {
            Csd::V1(csd) => csd.card_capacity_blocks(),
            Csd::V2(csd) => csd.card_capacity_blocks(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn csd_v1() {
        let csd = Csd::from(hex!("00 26 00 32 5F 59 83 C8 AD DB CF FF D2 40 40 A5"));
        let Csd::V1(v1) = csd else {
            panic!("expected a version 1 layout");
        };

        assert_eq!(v1.version(), 0);
        assert_eq!(v1.data_read_access_time1(), 0x26);
        assert_eq!(v1.max_data_transfer_rate(), 0x32);
        assert_eq!(v1.card_command_classes(), 0x5F5);
        assert_eq!(v1.read_block_length(), 9);
        assert!(v1.read_partial_blocks());
        assert_eq!(v1.device_size(), 3874);
        assert_eq!(v1.max_read_current_vdd_min(), 5);
        assert_eq!(v1.max_write_current_vdd_max(), 6);
        assert_eq!(v1.device_size_multiplier(), 7);
        assert!(v1.erase_single_block_enabled());
        assert_eq!(v1.erase_sector_size(), 0x1F);
        assert_eq!(v1.write_protect_group_size(), 0x7F);
        assert!(v1.write_protect_group_enable());
        assert_eq!(v1.write_speed_factor(), 4);
        assert_eq!(v1.max_write_data_length(), 9);
        assert!(v1.copy_flag());
        assert_eq!(v1.crc(), 0xA5 >> 1);

        assert_eq!(csd.card_capacity_blocks(), 1_984_000);
        assert_eq!(csd.card_capacity(), Size::from_bytes(1_015_808_000u64));
    }

    #[test]
    fn csd_v2() {
        let csd = Csd::from(hex!("40 0E 00 32 5B 59 00 00 1D 69 7F 80 0A 40 00 8B"));
        let Csd::V2(v2) = csd else {
            panic!("expected a version 2 layout");
        };

        assert_eq!(v2.version(), 1);
        assert_eq!(v2.data_read_access_time1(), 0x0E);
        assert_eq!(v2.card_command_classes(), 0x5B5);
        assert_eq!(v2.read_block_length(), 9);
        assert!(!v2.read_partial_blocks());
        assert_eq!(v2.device_size(), 7529);
        assert!(v2.erase_single_block_enabled());
        assert_eq!(v2.erase_sector_size(), 0x7F);
        assert_eq!(v2.write_protect_group_size(), 0);
        assert_eq!(v2.write_speed_factor(), 2);
        assert_eq!(v2.max_write_data_length(), 9);
        assert!(!v2.copy_flag());
        assert_eq!(v2.crc(), 0x8B >> 1);

        assert_eq!(csd.card_capacity_blocks(), 7_710_720);
        assert_eq!(csd.card_capacity(), Size::from_bytes(3_947_888_640u64));
    }

    #[test]
    fn csd_v2_from_chosen_fields() {
        let raw: u128 = (0b01 << 126)
            | (0x7A << 112)
            | (0x3C << 104)
            | (0x5A << 96)
            | (0xA5C << 84)
            | (0x9 << 80)
            | (1 << 77)
            | (0x2A_5A5A << 48)
            | (0x55 << 39)
            | (0x2B << 32)
            | (1 << 31)
            | (0x5 << 26)
            | (0xA << 22)
            | (1 << 14)
            | (1 << 12)
            | (0b10 << 10)
            | (0x4D << 1)
            | 1;
        let v2 = CsdV2::from(raw.to_be_bytes());

        assert_eq!(v2.version(), 0b01);
        assert_eq!(v2.data_read_access_time1(), 0x7A);
        assert_eq!(v2.data_read_access_time2(), 0x3C);
        assert_eq!(v2.max_data_transfer_rate(), 0x5A);
        assert_eq!(v2.card_command_classes(), 0xA5C);
        assert_eq!(v2.read_block_length(), 0x9);
        assert!(!v2.read_partial_blocks());
        assert!(!v2.write_block_misalignment());
        assert!(v2.read_block_misalignment());
        assert!(!v2.dsr_implemented());
        assert_eq!(v2.device_size(), 0x2A_5A5A);
        assert!(!v2.erase_single_block_enabled());
        assert_eq!(v2.erase_sector_size(), 0x55);
        assert_eq!(v2.write_protect_group_size(), 0x2B);
        assert!(v2.write_protect_group_enable());
        assert_eq!(v2.write_speed_factor(), 0x5);
        assert_eq!(v2.max_write_data_length(), 0xA);
        assert!(!v2.write_partial_blocks_allowed());
        assert!(!v2.file_format_group());
        assert!(v2.copy_flag());
        assert!(!v2.permanent_write_protection());
        assert!(v2.temporary_write_protection());
        assert_eq!(v2.file_format(), 0b10);
        assert_eq!(v2.crc(), 0x4D);
        assert_eq!(v2.card_capacity_blocks(), (0x2A_5A5A + 1) * 1024);
    }
}
