//! CRC-16/CCITT-FALSE as used by the EMV QR checksum field.
//!
//! Polynomial 0x1021, initial value 0xFFFF, MSB first, no reflection,
//! no final XOR.

const POLY: u16 = 0x1021;
const INIT: u16 = 0xffff;

/// Lookup table for one byte of input, built at compile time.
const CRC16_TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ POLY } else { crc << 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute CRC-16/CCITT-FALSE over a byte slice.
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    data.iter().fold(INIT, |crc, &b| {
        (crc << 8) ^ CRC16_TABLE[((crc >> 8) as u8 ^ b) as usize]
    })
}

/// Checksum rendered the way the payload carries it: 4 uppercase hex digits.
pub fn checksum_hex(data: &str) -> String {
    format!("{:04X}", crc16_ccitt(data.as_bytes()))
}
