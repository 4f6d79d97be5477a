/*
    gcn_dasm
    Copyright 2022-2025 Daniel Balsom
    https://github.com/dbalsom/gcn_dasm

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.
*/

//! Bitfield access over little-endian dword streams.
//!
//! Instruction fields are addressed by absolute bit position within the instruction, so a field
//! at bit 40 lives in bits 8.. of the second dword. Fields may straddle a dword boundary.

/// Read a dword, treating anything past the end of the stream as zero.
#[inline]
pub fn word_at(words: &[u32], index: usize) -> u32 {
    match words.get(index) {
        Some(word) => *word,
        None => {
            log::warn!("read of dword {} past the end of a {} dword stream", index, words.len());
            0
        }
    }
}

/// Extract `count` bits (1..=32) starting at absolute bit `start` of a dword stream.
pub fn extract(words: &[u32], start: u32, count: u32) -> u32 {
    debug_assert!(count > 0 && count <= 32);
    let index = (start / 32) as usize;
    let shift = start % 32;

    let mut value = word_at(words, index) >> shift;
    if shift + count > 32 {
        value |= word_at(words, index + 1) << (32 - shift);
    }
    mask(value, count)
}

/// Extract `count` bits starting at bit `start` of a single dword.
#[inline]
pub fn bfe(word: u32, start: u32, count: u32) -> u32 {
    mask(word >> start, count)
}

#[inline]
fn mask(value: u32, count: u32) -> u32 {
    if count >= 32 {
        value
    }
    else {
        value & ((1u32 << count) - 1)
    }
}

/// Interpret the low `bits` bits of `value` as a two's complement integer.
#[inline]
pub fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_within_dword() {
        let words = [0xdead_beef, 0x0123_4567];
        assert_eq!(extract(&words, 0, 8), 0xef);
        assert_eq!(extract(&words, 16, 16), 0xdead);
        assert_eq!(extract(&words, 32, 32), 0x0123_4567);
        assert_eq!(extract(&words, 40, 4), 0x5);
    }

    #[test]
    fn extract_straddles_dwords() {
        let words = [0xf000_0000, 0x0000_000a];
        assert_eq!(extract(&words, 28, 8), 0xaf);
    }

    #[test]
    fn extract_past_end_reads_zero() {
        let words = [0xffff_ffff];
        assert_eq!(extract(&words, 32, 8), 0);
        assert_eq!(extract(&words, 28, 8), 0x0f);
    }

    #[test]
    fn sign_extension() {
        assert_eq!(sign_extend(0xfff, 12), -1);
        assert_eq!(sign_extend(0x7ff, 12), 2047);
        assert_eq!(sign_extend(0x1000, 13), -4096);
        assert_eq!(sign_extend(0x10_0000, 21), -1048576);
    }

    #[test]
    fn bfe_single_word() {
        assert_eq!(bfe(0xbf81_0000, 23, 9), 0x17f);
        assert_eq!(bfe(0x8000_0000, 31, 1), 1);
    }
}
