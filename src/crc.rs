/// CRC-7 calculation.
pub fn crc7(data: &[u8]) -> u8 {
    let mut crc = 0;
    for mut byte in data.iter().cloned() {
        for _bit in 0..8 {
            crc <<= 1;
            if ((byte & 0x80) ^ (crc & 0x80)) != 0 {
                crc ^= 0x09;
            }
            byte <<= 1;
        }
    }
    crc & 0x7F
}

/// Last byte of a command frame: CRC-7 over opcode and argument with the end bit set.
pub fn command_crc(body: &[u8; 5]) -> u8 {
    (crc7(body) << 1) | 0x01
}

/// CRC-16 (CCITT) calculation, as used for data blocks.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = 0;
    for &byte in data {
        crc = ((crc >> 8) & 0xFF) | (crc << 8);
        crc ^= u16::from(byte);
        crc ^= (crc & 0xFF) >> 4;
        crc ^= crc << 12;
        crc ^= (crc & 0xFF) << 5;
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn go_idle_frame_crc() {
        assert_eq!(command_crc(&[0x40, 0x00, 0x00, 0x00, 0x00]), 0x95);
    }

    #[test]
    fn send_if_cond_frame_crc() {
        assert_eq!(command_crc(&[0x48, 0x00, 0x00, 0x01, 0xAA]), 0x87);
    }

    #[test]
    fn read_ocr_frame_crc() {
        assert_eq!(command_crc(&[0x7A, 0x00, 0x00, 0x00, 0x00]), 0xFD);
    }

    #[test]
    fn crc7_register_block() {
        // A CSD read from a real card, its last byte is the CRC with the end bit.
        const DATA: [u8; 15] = hex!("00 26 00 32 5F 59 83 C8 AD DB CF FF D2 40 40");
        assert_eq!((crc7(&DATA) << 1) | 1, 0xA5);
    }

    #[test]
    fn end_bit_always_set() {
        for opcode in 0..64u8 {
            for arg in [0u32, 1, 0x1AA, 0x4000_0000, 0xDEAD_BEEF, u32::MAX] {
                let a = arg.to_be_bytes();
                let crc = command_crc(&[0x40 | opcode, a[0], a[1], a[2], a[3]]);
                assert_eq!(crc & 0x01, 0x01);
            }
        }
    }

    #[test]
    fn crc16_data_block() {
        const DATA: [u8; 16] = hex!("00 26 00 32 5F 5A 83 AE FE FB CF FF 92 80 40 DF");
        assert_eq!(crc16(&DATA), 0x9FC5);
    }

    #[test]
    fn crc16_all_ones_sector() {
        assert_eq!(crc16(&[0xFF; 512]), 0x7FA1);
    }
}
