//! Base-62 encoding of arbitrary byte strings
//!
//! The input is read as one unsigned big-endian integer and written out
//! most significant digit first, so leading zero bytes do not contribute
//! digits and the value zero encodes as `"0"`.

pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u32 = 62;

pub fn encode(bytes: &[u8]) -> String {
    let mut number: Vec<u8> = bytes.iter().copied().skip_while(|b| *b == 0).collect();
    if number.is_empty() {
        return "0".to_string();
    }

    // 长除法：每轮除以 62，余数即为最低位
    let mut digits = Vec::with_capacity(bytes.len() * 2);
    while !number.is_empty() {
        let mut remainder: u32 = 0;
        let mut quotient = Vec::with_capacity(number.len());
        for &byte in &number {
            let acc = (remainder << 8) | u32::from(byte);
            let q = acc / BASE;
            remainder = acc % BASE;
            if !quotient.is_empty() || q != 0 {
                quotient.push(q as u8);
            }
        }
        digits.push(ALPHABET[remainder as usize]);
        number = quotient;
    }

    digits.into_iter().rev().map(char::from).collect()
}
