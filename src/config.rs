/// Represents config for [`SdMmcSpi`](crate::SdMmcSpi).
pub trait SdMmcSpiConfig {
    /// Max bytes to poll for the R1 part of a response.
    const READ_R1_ATTEMPTS: usize;
    /// Max ACMD41 attempts before giving up on card activation.
    const INIT_ATTEMPTS: usize;
    /// Delay between ACMD41 attempts, ms.
    const INIT_RETRY_DELAY_MS: u32;
    /// Delay after power up before the init clocks, ms.
    const POWER_UP_DELAY_MS: u32;
    /// Max bytes to poll for a data start token.
    const READ_TOKEN_ATTEMPTS: usize;
    /// Max bytes to poll while the card is busy programming.
    const WAIT_AVAILABLE_ATTEMPTS: usize;
    /// Check the CRC-16 of received data blocks.
    const VERIFY_READ_CRC: bool;
}

/// Default implementation of [`SdMmcSpiConfig`](crate::SdMmcSpiConfig).
pub struct DefaultSdMmcSpiConfig;

impl SdMmcSpiConfig for DefaultSdMmcSpiConfig {
    const READ_R1_ATTEMPTS: usize = 8;
    const INIT_ATTEMPTS: usize = 100;
    const INIT_RETRY_DELAY_MS: u32 = 10;
    const POWER_UP_DELAY_MS: u32 = 10;
    const READ_TOKEN_ATTEMPTS: usize = 0x1_0000;
    const WAIT_AVAILABLE_ATTEMPTS: usize = 0x10_0000;
    const VERIFY_READ_CRC: bool = false;
}
