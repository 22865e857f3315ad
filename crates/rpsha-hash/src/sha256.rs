//! Streaming SHA-256 (FIPS 180-4).
//!
//! The hasher keeps a fixed 64-byte pending buffer, so it never allocates and
//! is suitable for small targets. Finalization works on a copy of the state,
//! which lets callers read a digest and keep feeding data.

#![forbid(unsafe_code)]

/// Size of one compression block in bytes.
pub const BLOCK_LEN: usize = 64;

/// Size of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Length of a digest rendered as lowercase hex.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// Offset of the 64-bit length field inside the final padding block.
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// Initial hash values (first 32 bits of fractional parts of square roots of first 8 primes).
const H: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
    0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Round constants (first 32 bits of fractional parts of cube roots of first 64 primes).
const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5,
    0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3,
    0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc,
    0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7,
    0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13,
    0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3,
    0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5,
    0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208,
    0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// Incremental SHA-256 hasher.
///
/// `update` requires `&mut self`, so a hasher has exactly one writer at a time.
/// Independent hashes need independent instances; `Clone` forks a shared prefix.
#[derive(Debug, Clone)]
pub struct Sha256 {
    /// Chaining state, advanced once per full block.
    state: [u32; 8],
    /// Bytes received but not yet compressed. Only `buffer[..buffer_len]` is live.
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    /// Total message length in bits, modulo 2^64.
    bit_len: u64,
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256 {
    /// Create a hasher holding the SHA-256 initial state.
    pub fn new() -> Self {
        Self {
            state: H,
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
            bit_len: 0,
        }
    }

    /// Absorb `data`, compressing every complete block immediately.
    pub fn update(&mut self, mut data: &[u8]) {
        self.bit_len = self
            .bit_len
            .wrapping_add((data.len() as u64).wrapping_mul(8));

        // Top up a partially filled buffer first
        if self.buffer_len > 0 {
            let take = (BLOCK_LEN - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len < BLOCK_LEN {
                return;
            }
            compress(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        // Whole blocks straight from the input
        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    /// Absorb the UTF-8 bytes of `s`.
    pub fn update_str(&mut self, s: &str) {
        self.update(s.as_bytes());
    }

    /// Compute the digest of everything absorbed so far.
    ///
    /// Padding runs on a copy of the buffer, bit count and chaining state, so
    /// the hasher is unchanged: repeated calls agree, and later updates extend
    /// the same message.
    pub fn digest(&self) -> [u8; DIGEST_LEN] {
        // The overflow block (if any) continues the live chain, on a copy
        let mut state = self.state;

        // Zero-initialized, which covers all padding bytes
        let mut block = [0u8; BLOCK_LEN];
        block[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        block[self.buffer_len] = 0x80;

        // No room for the length field: flush this block and pad a fresh one
        if self.buffer_len + 1 > LENGTH_OFFSET {
            compress(&mut state, &block);
            block = [0u8; BLOCK_LEN];
        }

        block[LENGTH_OFFSET..].copy_from_slice(&self.bit_len.to_be_bytes());
        compress(&mut state, &block);

        let mut result = [0u8; DIGEST_LEN];
        for (i, word) in state.iter().enumerate() {
            result[i * 4..(i + 1) * 4].copy_from_slice(&word.to_be_bytes());
        }
        result
    }

    /// Digest as 64 lowercase hex characters.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }

    /// Consume the hasher and return its digest.
    pub fn finalize(self) -> [u8; DIGEST_LEN] {
        self.digest()
    }

    /// Return to the freshly created state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of message bits absorbed so far (modulo 2^64).
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Number of bytes waiting for a full block. Always below `BLOCK_LEN`.
    pub fn pending_len(&self) -> usize {
        self.buffer_len
    }
}

/// Compute the SHA-256 digest of `data` in one call.
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.digest()
}

/// Compute the SHA-256 digest of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.digest_hex()
}

/// Compress one 512-bit block into the state.
fn compress(state: &mut [u32; 8], block: &[u8]) {
    debug_assert_eq!(block.len(), BLOCK_LEN);

    // Prepare message schedule W[0..63]
    let mut w = [0u32; 64];

    // First 16 words from block
    for (i, chunk) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    // Extend to 64 words
    for i in 16..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for i in 0..64 {
        let temp1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(K[i])
            .wrapping_add(w[i]);
        let temp2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(temp1);
        d = c;
        c = b;
        b = a;
        a = temp1.wrapping_add(temp2);
    }

    for (word, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *word = word.wrapping_add(v);
    }
}

#[inline(always)]
fn ch(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ (!e & g)
}

#[inline(always)]
fn maj(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

#[inline(always)]
fn big_sigma0(a: u32) -> u32 {
    a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(e: u32) -> u32 {
    e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}
