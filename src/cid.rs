use bitfield::bitfield;

/// Card Identification block.
pub type CidData = [u8; 16];

bitfield! {
    /// Card Identification register.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Cid(u128);
    impl Debug;
    pub u8, manufacturer_id, _: 127, 120;
    pub u16, oem_id, _: 119, 104;
    pub u64, product_name_raw, _: 103, 64;
    pub u8, product_revision, _: 63, 56;
    pub u32, serial_number, _: 55, 24;
    pub u16, manufacturing_date, _: 19, 8;
    pub u8, crc, _: 7, 1;
}

impl Cid {
    /// Product name, 5 ASCII characters.
    pub fn product_name(&self) -> [u8; 5] {
        let raw = self.product_name_raw().to_be_bytes();
        [raw[3], raw[4], raw[5], raw[6], raw[7]]
    }

    /// Product revision as (major, minor).
    pub fn revision(&self) -> (u8, u8) {
        let prv = self.product_revision();
        (prv >> 4, prv & 0x0F)
    }

    /// Year of manufacture.
    pub fn manufacturing_year(&self) -> u16 {
        2000 + (self.manufacturing_date() >> 4)
    }

    /// Month of manufacture, 1-12.
    pub fn manufacturing_month(&self) -> u8 {
        (self.manufacturing_date() & 0x0F) as u8
    }
}

impl From<CidData> for Cid {
    fn from(cid_data: CidData) -> Self {
        Cid(u128::from_be_bytes(cid_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn sandisk_cid() {
        let cid = Cid::from(hex!("03 53 44 53 44 31 36 47 80 12 34 56 78 01 2A 71"));

        assert_eq!(cid.manufacturer_id(), 0x03);
        assert_eq!(cid.oem_id(), 0x5344);
        assert_eq!(&cid.product_name(), b"SD16G");
        assert_eq!(cid.product_revision(), 0x80);
        assert_eq!(cid.revision(), (8, 0));
        assert_eq!(cid.serial_number(), 0x1234_5678);
        assert_eq!(cid.manufacturing_date(), 0x12A);
        assert_eq!(cid.manufacturing_year(), 2018);
        assert_eq!(cid.manufacturing_month(), 10);
        assert_eq!(cid.crc(), 0x38);
    }
}
