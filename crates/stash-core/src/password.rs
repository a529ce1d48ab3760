use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Work factor applied to new registrations unless configured otherwise.
pub const DEFAULT_ITERATIONS: u32 = 600_000;

/// Lowest work factor accepted from configuration.
pub const MIN_ITERATIONS: u32 = 1_000;

/// Highest work factor accepted from configuration. Fits the `INTEGER` column.
pub const MAX_ITERATIONS: u32 = 10_000_000;

const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Salted PBKDF2-HMAC-SHA256 password hashing.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: u32,
}

/// Output of [`PasswordHasher::hash`], ready to be stored next to the username.
#[derive(Debug, Clone)]
pub struct PasswordDigest {
    pub hash: String,
    pub salt: String,
    pub iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> PasswordDigest {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let derived = derive(password, &salt, self.iterations);
        PasswordDigest {
            hash: hex::encode(derived),
            salt: hex::encode(salt),
            iterations: self.iterations,
        }
    }

    /// Check `password` against a stored digest, using the digest's own salt and
    /// iteration count. Comparison is constant-time.
    pub fn verify(password: &str, hash: &str, salt: &str, iterations: u32) -> bool {
        let (Ok(expected), Ok(salt)) = (hex::decode(hash), hex::decode(salt)) else {
            tracing::warn!("Stored password digest is not valid hex");
            return false;
        };
        let derived = derive(password, &salt, iterations);
        derived.as_slice().ct_eq(expected.as_slice()).into()
    }
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}
