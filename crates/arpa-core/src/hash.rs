/// 31-multiply string hash every identifier in the system is built from.
///
/// Operates on UTF-16 code units with a wrapping 32-bit signed accumulator
/// and returns the absolute value. The exact sequence is load-bearing:
/// persisted path hashes and context keys were produced by it, so it must not
/// change across releases.
pub fn hash_code(s: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in s.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    h.unsigned_abs()
}
