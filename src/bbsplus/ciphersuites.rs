// Copyright 2023 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use core::fmt::Debug;
use digest::HashMarker;
use elliptic_curve::hash2curve::{ExpandMsg, ExpandMsgXmd, ExpandMsgXof};
use sha2::Sha256;
use sha3::Shake256;

/// Domain tag for mapping attribute octets to scalars.
pub const ATTRIBUTE_DST: &[u8] = b"BBS_PLUS_H2S_";
/// Domain tag under which basis labels are hashed to G1.
pub const BASIS_DST: &[u8] = b"BBS_PLUS_BASIS_";
/// Label of the blinding base `h0`.
pub const H0_LABEL: &[u8] = b"BBS_PLUS_H0";
/// Label prefix of the attribute bases; `h_i` uses `BBS_PLUS_H{i}`.
pub const H_LABEL_PREFIX: &str = "BBS_PLUS_H";
/// Fiat-Shamir domain tag of the selective disclosure proof.
pub const CHALLENGE_DST: &[u8] = b"BBS_PLUS_PROOF_V1";
/// Fiat-Shamir domain tag of the holder-side blinded proof.
pub const BLINDED_CHALLENGE_DST: &[u8] = b"BBS_PLUS_BLINDED_PROOF_V1";
/// Domain tag for deterministic secret key derivation.
pub const KEYGEN_DST: &[u8] = b"BBS_PLUS_KEYGEN_";

/// Minimum length of the key material accepted by deterministic key generation.
pub const IKM_LEN: usize = 32;

/// Upper bound on resampling `r` when `x + y·r ≡ 0 (mod p)`.
pub const MAX_SIGN_RETRIES: usize = 16;

pub trait BbsCiphersuite: Clone + Copy + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    const ID: &'static [u8];
    /// Bytes of uniform output reduced into a scalar (`ceil((ceil(log2(p)) + k) / 8)`).
    const EXPAND_LEN: usize = 48;
    type HashAlg: HashMarker;
    type Expander: for<'a> ExpandMsg<'a>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bls12381Shake256 {}
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bls12381Sha256 {}

impl BbsCiphersuite for Bls12381Shake256 {
    const ID: &'static [u8] = b"BBS_PLUS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_";
    type HashAlg = Shake256;
    type Expander = ExpandMsgXof<Self::HashAlg>;
}

impl BbsCiphersuite for Bls12381Sha256 {
    const ID: &'static [u8] = b"BBS_PLUS_BLS12381G1_XMD:SHA-256_SSWU_RO_";
    type HashAlg = Sha256;
    type Expander = ExpandMsgXmd<Self::HashAlg>;
}
