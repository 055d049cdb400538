//! Session-token check hash.

/// Derives the numeric check token (`ptqrtoken`) from a `qrsig` session
/// token.
///
/// This is a fixed, order-dependent rolling hash over the token's bytes,
/// masked to 31 bits at every step. The remote endpoint computes the same
/// value and rejects polls whose token does not match, so the algorithm
/// must reproduce the reference bit-for-bit.
pub fn qr_token(qrsig: &str) -> u32 {
    const MASK: i64 = 0x7fff_ffff;
    let mut hash: i64 = 0;
    for &byte in qrsig.as_bytes() {
        hash += (((hash << 5) & MASK) + i64::from(byte)) & MASK;
        hash &= MASK;
    }
    (hash & MASK) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    // Fixed vectors: the remote endpoint validates this value, so any
    // change to the algorithm shows up here.
    #[test]
    fn reference_vectors() {
        assert_eq!(qr_token(""), 0);
        assert_eq!(qr_token("abc"), 108_966);
        assert_eq!(qr_token("qrsig"), 138_234_694);
        assert_eq!(qr_token("0123456789abcdefghij"), 556_840_932);
    }

    #[test]
    fn real_shaped_token() {
        // 77 characters, the shape the endpoint actually hands out.
        let qrsig =
            "hVHl8pZBuqPr3PmKEjCCap1EqM2JbtCY9*jqnKvMTteWUCzJVJpCFbdc3nZ0HdkTJ9-kXVmEWdM_";
        assert_eq!(qr_token(qrsig), 566_813_333);
    }

    #[test]
    fn stays_within_31_bits() {
        let long = "x".repeat(4096);
        assert!(qr_token(&long) <= 0x7fff_ffff);
    }

    #[test]
    fn order_dependent() {
        assert_ne!(qr_token("ab"), qr_token("ba"));
    }
}
