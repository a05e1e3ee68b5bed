/// Sector (data block) size in bytes.
pub const BLOCK_SIZE: usize = 512;
/// Sector size as u64 for capacity math.
pub const BLOCK_SIZE_U64: u64 = BLOCK_SIZE as u64;

pub mod commands {
    /// Start bits of the first frame byte ("01" followed by the opcode).
    pub const CMD_BASE: u8 = 0x40;
    /// Opcode mask, opcodes are 6 bits wide.
    pub const CMD_MASK: u8 = 0x3F;
    /// ACMD flag, the command has to be prefixed by APP_CMD.
    pub const ACMD_FLAG: u8 = 0x80;
    /// GO_IDLE_STATE - init card in spi mode if CS low.
    pub const CMD0: u8 = 0;
    /// SEND_IF_COND - verify SD Memory Card interface operating condition.
    pub const CMD8: u8 = 8;
    /// SEND_CSD - read the Card Specific Data (CSD register).
    pub const CMD9: u8 = 9;
    /// SEND_CID - read the Card Identification (CID register).
    pub const CMD10: u8 = 10;
    /// SEND_STATUS - read the card status register.
    pub const CMD13: u8 = 13;
    /// SET_BLOCKLEN - set the block length for byte addressed cards.
    pub const CMD16: u8 = 16;
    /// READ_SINGLE_BLOCK - read a single data block from the card.
    pub const CMD17: u8 = 17;
    /// WRITE_BLOCK - write a single data block to the card.
    pub const CMD24: u8 = 24;
    /// APP_CMD - escape for application specific command.
    pub const CMD55: u8 = 55;
    /// READ_OCR - read the OCR register of a card.
    pub const CMD58: u8 = 58;
    /// SD_STATUS - read the SD Status register.
    pub const ACMD13: u8 = ACMD_FLAG + 13;
    /// SD_SEND_OP_COMD - Sends host capacity support information and activates
    /// the card's initialization process.
    pub const ACMD41: u8 = ACMD_FLAG + 41;
    /// SEND_SCR - read the SD Configuration register.
    pub const ACMD51: u8 = ACMD_FLAG + 51;
}

pub mod args {
    /// SEND_IF_COND argument: 2.7-3.6V supply and the 0xAA check pattern.
    pub const IF_COND_PATTERN: u32 = 0x0000_01AA;
    /// Part of the SEND_IF_COND echo that must match the argument.
    pub const IF_COND_ECHO_MASK: u32 = 0x0000_0FFF;
    /// SD_SEND_OP_COMD argument bit: host supports high capacity cards.
    pub const HCS: u32 = 0x4000_0000;
}

pub mod tokens {
    /// Idle bus level, also clocked out when only receiving.
    pub const AVAILABLE: u8 = 0xFF;
    /// Start data token for read or write single block.
    pub const DATA_START_BLOCK: u8 = 0xFE;
    /// Mask for data response tokens after a write block operation.
    pub const DATA_RES_MASK: u8 = 0x1F;
    /// Write data accepted token.
    pub const DATA_RES_ACCEPTED: u8 = 0x05;
}
