use rand::Rng;

const COUPON_CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate an upper-case coupon code of `len` characters.
/// Look-alike characters (0/O, 1/I) are left out.
pub fn generate_coupon_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| COUPON_CODE_CHARSET[rng.gen_range(0..COUPON_CODE_CHARSET.len())] as char)
        .collect()
}
