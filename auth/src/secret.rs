use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

/// Generate `len` bytes of key material from the operating system RNG.
///
/// Keys generated this way live only as long as the process. Tokens signed
/// with one will not verify after a restart or on another instance.
pub fn random_secret(len: usize) -> Vec<u8> {
    let mut secret = vec![0u8; len];
    OsRng.fill_bytes(&mut secret);
    secret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret() {
        let first = random_secret(32);
        let second = random_secret(32);

        assert_eq!(first.len(), 32);
        assert_ne!(first, second);
    }
}
