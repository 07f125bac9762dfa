/// Generator polynomial x^8 + x^5 + x^4 + 1.
const POLYNOMIAL: u8 = 0x31;
const INIT: u8 = 0xFF;

/// CRC-8 over `data` as used by Sensirion sensors: MSB first, no final XOR.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = INIT;
    for byte in data.iter().copied() {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 == 0 {
                crc <<= 1;
            } else {
                crc = (crc << 1) ^ POLYNOMIAL;
            }
        }
    }
    crc
}
