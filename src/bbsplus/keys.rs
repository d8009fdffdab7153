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

use core::fmt;

use ff::Field;
use rand::{CryptoRng, RngCore};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::{
    ciphersuites::{IKM_LEN, KEYGEN_DST},
    generators::Generators,
};
use crate::{
    backend::GroupBackend,
    errors::Error,
    keys::pair::KeyPair,
    utils::util::{i2osp, ByteReader},
};

/// Public key `(X = g2^x, Y = g2^y, h_bases)`.
#[derive(Clone, Debug)]
pub struct BBSplusPublicKey<B: GroupBackend> {
    pub X: B::G2,
    pub Y: B::G2,
    pub h_bases: Vec<B::G1>,
}

impl<B: GroupBackend> PartialEq for BBSplusPublicKey<B> {
    fn eq(&self, other: &Self) -> bool {
        self.X == other.X && self.Y == other.Y && self.h_bases == other.h_bases
    }
}

impl<B: GroupBackend> Eq for BBSplusPublicKey<B> {}

impl<B: GroupBackend> BBSplusPublicKey<B> {
    pub fn h_bases(&self) -> &[B::G1] {
        &self.h_bases
    }

    pub fn max_attributes(&self) -> usize {
        self.h_bases.len().saturating_sub(1)
    }

    /// Re-derives the basis vector from its labels; `false` means the issuer published bases
    /// that were not produced by hash-to-curve and may have known discrete logarithms.
    pub fn check_bases(&self, backend: &B) -> Result<bool, Error> {
        Generators::check(backend, &self.h_bases)
    }

    /// `X || Y || I2OSP(len(h_bases), 8) || h_0 || … || h_L`
    pub fn to_bytes(&self, backend: &B) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(2 * B::G2_BYTES + 8 + self.h_bases.len() * B::G1_BYTES);
        bytes.extend_from_slice(&backend.g2_to_bytes(&self.X));
        bytes.extend_from_slice(&backend.g2_to_bytes(&self.Y));
        bytes.extend_from_slice(&i2osp(self.h_bases.len(), 8));
        self.h_bases
            .iter()
            .for_each(|h| bytes.extend_from_slice(&backend.g1_to_bytes(h)));
        bytes
    }

    pub fn from_bytes(backend: &B, bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = ByteReader::new(bytes);
        let X = backend.g2_from_bytes(reader.take(B::G2_BYTES)?)?;
        let Y = backend.g2_from_bytes(reader.take(B::G2_BYTES)?)?;
        let count = reader.read_u64()?;
        if count == 0 {
            return Err(Error::DeserializationError("public key without h0".to_owned()));
        }
        let expected = count
            .checked_mul(B::G1_BYTES)
            .ok_or_else(|| Error::DeserializationError("basis count overflow".to_owned()))?;
        if expected != bytes.len() - 2 * B::G2_BYTES - 8 {
            return Err(Error::DeserializationError(format!(
                "public key announces {} bases, found {} bytes",
                count,
                bytes.len() - 2 * B::G2_BYTES - 8
            )));
        }
        let h_bases = (0..count)
            .map(|_| backend.g1_from_bytes(reader.take(B::G1_BYTES)?))
            .collect::<Result<Vec<_>, Error>>()?;
        reader.finish()?;

        Ok(Self { X, Y, h_bases })
    }

    pub fn encode(&self, backend: &B) -> String {
        hex::encode(self.to_bytes(backend))
    }
}

impl<B: GroupBackend> Serialize for BBSplusPublicKey<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.encode(&B::default()))
    }
}

impl<'de, B: GroupBackend> Deserialize<'de> for BBSplusPublicKey<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(encoded).map_err(de::Error::custom)?;
        Self::from_bytes(&B::default(), &bytes).map_err(de::Error::custom)
    }
}

/// Secret key `(x, y)`, both nonzero.
#[derive(Clone)]
pub struct BBSplusSecretKey<B: GroupBackend> {
    pub(crate) x: B::Scalar,
    pub(crate) y: B::Scalar,
}

impl<B: GroupBackend> fmt::Debug for BBSplusSecretKey<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BBSplusSecretKey(..)")
    }
}

impl<B: GroupBackend> PartialEq for BBSplusSecretKey<B> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<B: GroupBackend> Eq for BBSplusSecretKey<B> {}

impl<B: GroupBackend> BBSplusSecretKey<B> {
    pub fn new(x: B::Scalar, y: B::Scalar) -> Result<Self, Error> {
        if bool::from(x.is_zero()) || bool::from(y.is_zero()) {
            return Err(Error::KeyGenError("secret key component is zero".to_owned()));
        }
        Ok(Self { x, y })
    }

    //in BE order, x || y
    pub fn to_bytes(&self, backend: &B) -> Vec<u8> {
        [backend.scalar_to_bytes(&self.x), backend.scalar_to_bytes(&self.y)].concat()
    }

    pub fn from_bytes(backend: &B, bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = ByteReader::new(bytes);
        let x = backend.scalar_from_bytes(reader.take(B::SCALAR_BYTES)?)?;
        let y = backend.scalar_from_bytes(reader.take(B::SCALAR_BYTES)?)?;
        reader.finish()?;
        Self::new(x, y)
    }

    pub fn encode(&self, backend: &B) -> String {
        hex::encode(self.to_bytes(backend))
    }

    /// The G2 half of the public key.
    pub fn to_public_parts(&self, backend: &B) -> (B::G2, B::G2) {
        let g2 = backend.g2_generator();
        (g2 * self.x, g2 * self.y)
    }
}

impl<B: GroupBackend> KeyPair<B> {
    /// # Description
    /// Samples an issuer key pair: `x, y` uniform nonzero, `X = g2^x`, `Y = g2^y`, and
    /// `max_attributes + 1` basis points.
    ///
    /// # Inputs:
    /// * `backend` (REQUIRED), the group backend
    /// * `max_attributes` (REQUIRED), the largest attribute vector the key can sign
    /// * `rng` (REQUIRED), a cryptographically secure random source
    ///
    /// # Output:
    /// a [`KeyPair`] or [`Error`].
    ///
    pub fn generate<R>(backend: &B, max_attributes: usize, rng: &mut R) -> Result<Self, Error>
    where
        R: RngCore + CryptoRng,
    {
        let sk = BBSplusSecretKey::new(backend.random_scalar(rng), backend.random_scalar(rng))?;
        Self::from_secret_key(backend, sk, max_attributes)
    }

    /// # Description
    /// Derives the key pair deterministically from a secret octet string.
    ///
    /// # Inputs:
    /// * `key_material` (REQUIRED), a secret octet string of at least 32 bytes
    /// * `key_info` (OPTIONAL), an octet string of at most 65535 bytes. Defaults to the empty string
    /// * `max_attributes` (REQUIRED), the largest attribute vector the key can sign
    ///
    /// # Output:
    /// a [`KeyPair`] or [`Error`].
    ///
    pub fn generate_from_material(
        backend: &B,
        key_material: &[u8],
        key_info: Option<&[u8]>,
        max_attributes: usize,
    ) -> Result<Self, Error> {
        if key_material.len() < IKM_LEN {
            return Err(Error::KeyGenError(format!("length(key_material) < {}", IKM_LEN)));
        }

        let key_info = key_info.unwrap_or(&[]);
        if key_info.len() > 65535 {
            return Err(Error::KeyGenError("length(key_info) > 65535".to_owned()));
        }

        // derive_input = key_material || I2OSP(length(key_info), 2) || key_info || component
        let derive_input = [key_material, &i2osp(key_info.len(), 2), key_info].concat();
        let x = backend.hash_to_scalar(KEYGEN_DST, &[derive_input.as_slice(), &[0u8]].concat())?;
        let y = backend.hash_to_scalar(KEYGEN_DST, &[derive_input.as_slice(), &[1u8]].concat())?;

        Self::from_secret_key(backend, BBSplusSecretKey::new(x, y)?, max_attributes)
    }

    pub fn from_secret_key(
        backend: &B,
        sk: BBSplusSecretKey<B>,
        max_attributes: usize,
    ) -> Result<Self, Error> {
        let (X, Y) = sk.to_public_parts(backend);
        let h_bases = Generators::create(backend, max_attributes)?.values;
        log::debug!("generated key pair for up to {} attributes", max_attributes);

        Ok(Self {
            public: BBSplusPublicKey { X, Y, h_bases },
            private: sk,
        })
    }
}

#[cfg(all(test, feature = "bls12_381"))]
mod tests {
    use super::*;
    use crate::backend::bls12_381::{Bls12381Sha256Backend, Bls12381Shake256Backend};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generate_shapes() {
        let backend = Bls12381Sha256Backend::new();
        let mut rng = StdRng::seed_from_u64(1);
        let keypair = KeyPair::generate(&backend, 5, &mut rng).unwrap();
        let pk = keypair.public_key();

        assert_eq!(pk.h_bases().len(), 6);
        assert_eq!(pk.max_attributes(), 5);
        assert_eq!(pk.X, backend.g2_generator() * keypair.private_key().x);
        assert_eq!(pk.Y, backend.g2_generator() * keypair.private_key().y);
        assert_ne!(keypair.private_key().x, keypair.private_key().y);
        assert!(pk.check_bases(&backend).unwrap());

        let empty = KeyPair::generate(&backend, 0, &mut rng).unwrap();
        assert_eq!(empty.public_key().h_bases().len(), 1);
    }

    #[test]
    fn key_material_is_deterministic() {
        let backend = Bls12381Shake256Backend::new();
        let ikm = [7u8; 32];
        let a = KeyPair::generate_from_material(&backend, &ikm, Some(b"issuer-1"), 3).unwrap();
        let b = KeyPair::generate_from_material(&backend, &ikm, Some(b"issuer-1"), 3).unwrap();
        let c = KeyPair::generate_from_material(&backend, &ikm, Some(b"issuer-2"), 3).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.private_key(), c.private_key());

        assert!(matches!(
            KeyPair::generate_from_material(&backend, &ikm[..31], None, 3),
            Err(Error::KeyGenError(_))
        ));
    }

    #[test]
    fn key_bytes() {
        let backend = Bls12381Sha256Backend::new();
        let mut rng = StdRng::seed_from_u64(2);
        let (sk, pk) = KeyPair::generate(&backend, 2, &mut rng).unwrap().into_parts();

        let pk_bytes = pk.to_bytes(&backend);
        assert_eq!(pk_bytes.len(), 96 * 2 + 8 + 48 * 3);
        assert_eq!(BBSplusPublicKey::from_bytes(&backend, &pk_bytes).unwrap(), pk);
        assert!(BBSplusPublicKey::<Bls12381Sha256Backend>::from_bytes(&backend, &pk_bytes[..pk_bytes.len() - 1]).is_err());

        let sk_bytes = sk.to_bytes(&backend);
        assert_eq!(sk_bytes.len(), 64);
        assert_eq!(BBSplusSecretKey::from_bytes(&backend, &sk_bytes).unwrap(), sk);
        assert!(matches!(
            BBSplusSecretKey::<Bls12381Sha256Backend>::from_bytes(&backend, &[0u8; 64]),
            Err(Error::KeyGenError(_))
        ));
        assert_eq!(format!("{:?}", sk), "BBSplusSecretKey(..)");

        let json = serde_json::to_string(&pk).unwrap();
        let back: BBSplusPublicKey<Bls12381Sha256Backend> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }

    #[test]
    fn tampered_bases_fail_check() {
        let backend = Bls12381Sha256Backend::new();
        let mut rng = StdRng::seed_from_u64(4);
        let mut pk = KeyPair::generate(&backend, 2, &mut rng).unwrap().public_key().clone();
        pk.h_bases[2] = backend.g1_generator() * backend.random_scalar(&mut rng);
        assert!(!pk.check_bases(&backend).unwrap());
    }
}
