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

use std::collections::BTreeMap;

use ff::Field;
use group::Group;
use rand::{CryptoRng, RngCore};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::{
    ciphersuites::MAX_SIGN_RETRIES,
    keys::{BBSplusPublicKey, BBSplusSecretKey},
};
use crate::{
    backend::GroupBackend,
    errors::Error,
    keys::pair::KeyPair,
    utils::{message::attributes_to_scalars, util::ByteReader},
};

/// Signature `(A, r)` with `A = (g1 · h0^r · Π h_i^{m_i})^{1/(x + y·r)}`.
#[derive(Clone, Debug)]
pub struct BBSplusSignature<B: GroupBackend> {
    pub a: B::G1,
    pub r: B::Scalar,
}

impl<B: GroupBackend> PartialEq for BBSplusSignature<B> {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.r == other.r
    }
}

impl<B: GroupBackend> Eq for BBSplusSignature<B> {}

impl<B: GroupBackend> BBSplusSignature<B> {
    /// # Description
    /// Signs an ordered attribute vector.
    ///
    /// # Inputs:
    /// * `backend` (REQUIRED), the group backend
    /// * `keypair` (REQUIRED), the issuer key pair
    /// * `attributes` (REQUIRED), at most `max_attributes` octet strings
    /// * `rng` (REQUIRED), a cryptographically secure random source for `r`
    ///
    /// # Output:
    /// a [`BBSplusSignature`] or [`Error`].
    ///
    pub fn sign<T, R>(backend: &B, keypair: &KeyPair<B>, attributes: &[T], rng: &mut R) -> Result<Self, Error>
    where
        T: AsRef<[u8]>,
        R: RngCore + CryptoRng,
    {
        check_attribute_count(keypair.public_key(), attributes.len())?;
        let scalars = attributes_to_scalars(backend, attributes)?;
        let signature = sign_with_fresh_r(backend, keypair, &scalars, rng, |r| r)?;

        log::debug!("signed {} attributes", attributes.len());
        Ok(signature)
    }

    /// # Description
    /// Checks `e(A, X · Y^r) == e(g1 · h0^r · Π h_i^{m_i}, g2)`.
    ///
    /// # Output:
    /// `Ok(true)` for a valid signature, `Ok(false)` for an invalid one, [`Error`] only when the
    /// attribute vector does not fit the public key.
    ///
    pub fn verify<T>(&self, backend: &B, pk: &BBSplusPublicKey<B>, attributes: &[T]) -> Result<bool, Error>
    where
        T: AsRef<[u8]>,
    {
        match core_verify(backend, pk, self, attributes) {
            Ok(()) => Ok(true),
            Err(e) if e.is_rejection() => {
                log::debug!("signature rejected: {}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// # Description
    /// Issuer-side re-signing: overwrites the attributes at the given indexes and recomputes `A`
    /// under the same `r`.
    ///
    /// # Inputs:
    /// * `keypair` (REQUIRED), the issuer key pair that produced `self`
    /// * `old_attributes` (REQUIRED), the attribute vector `self` was issued over
    /// * `updates` (REQUIRED), map from attribute index to its new value
    ///
    /// # Output:
    /// a new [`BBSplusSignature`] `(A_new, r)` or [`Error`].
    ///
    pub fn update_attributes<T, V>(
        &self,
        backend: &B,
        keypair: &KeyPair<B>,
        old_attributes: &[T],
        updates: &BTreeMap<usize, V>,
    ) -> Result<Self, Error>
    where
        T: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        check_attribute_count(keypair.public_key(), old_attributes.len())?;
        if let Some((index, _)) = updates.range(old_attributes.len()..).next() {
            return Err(Error::InvalidArgument(format!(
                "update index {} out of range [0, {})",
                index,
                old_attributes.len()
            )));
        }

        let new_attributes: Vec<&[u8]> = old_attributes
            .iter()
            .enumerate()
            .map(|(i, a)| updates.get(&i).map_or(a.as_ref(), |v| v.as_ref()))
            .collect();
        let scalars = attributes_to_scalars(backend, &new_attributes)?;
        let a = core_sign(backend, keypair.private_key(), keypair.public_key(), self.r, &scalars)?;

        log::debug!("re-signed {} of {} attributes", updates.len(), old_attributes.len());
        Ok(Self { a, r: self.r })
    }

    /// # Description
    /// Issuer-side re-randomisation: `r' = r + delta` for a fresh `delta`, then `A'` is
    /// recomputed over the same attributes. Needs the secret key; a holder who only has the
    /// public key presents through [`crate::bbsplus::blinded::BlindedDisclosureProof`] instead.
    ///
    /// # Output:
    /// a new [`BBSplusSignature`] `(A', r')` or [`Error`].
    ///
    pub fn re_randomise<T, R>(
        &self,
        backend: &B,
        keypair: &KeyPair<B>,
        attributes: &[T],
        rng: &mut R,
    ) -> Result<Self, Error>
    where
        T: AsRef<[u8]>,
        R: RngCore + CryptoRng,
    {
        check_attribute_count(keypair.public_key(), attributes.len())?;
        let scalars = attributes_to_scalars(backend, attributes)?;
        let r = self.r;
        sign_with_fresh_r(backend, keypair, &scalars, rng, |delta| r + delta)
    }

    /// `A_bytes || r_bytes`
    pub fn to_bytes(&self, backend: &B) -> Vec<u8> {
        [backend.g1_to_bytes(&self.a), backend.scalar_to_bytes(&self.r)].concat()
    }

    pub fn from_bytes(backend: &B, bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = ByteReader::new(bytes);
        let a = backend.g1_from_bytes(reader.take(B::G1_BYTES)?)?;
        let r = backend.scalar_from_bytes(reader.take(B::SCALAR_BYTES)?)?;
        reader.finish()?;
        Ok(Self { a, r })
    }
}

impl<B: GroupBackend> Serialize for BBSplusSignature<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(self.to_bytes(&B::default())))
    }
}

impl<'de, B: GroupBackend> Deserialize<'de> for BBSplusSignature<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(encoded).map_err(de::Error::custom)?;
        Self::from_bytes(&B::default(), &bytes).map_err(de::Error::custom)
    }
}

pub(crate) fn check_attribute_count<B: GroupBackend>(pk: &BBSplusPublicKey<B>, len: usize) -> Result<(), Error> {
    if pk.h_bases.is_empty() {
        return Err(Error::InvalidArgument("public key without h0".to_owned()));
    }
    if len > pk.max_attributes() {
        return Err(Error::InvalidArgument(format!(
            "{} attributes exceed the key maximum of {}",
            len,
            pk.max_attributes()
        )));
    }
    Ok(())
}

/// `g1 · Π_{i} h_{i+1}^{m_i}`, the part of the signed commitment that does not depend on `r`.
pub(crate) fn attribute_commitment<B: GroupBackend>(
    backend: &B,
    pk: &BBSplusPublicKey<B>,
    scalars: &[B::Scalar],
) -> Result<B::G1, Error> {
    check_attribute_count(pk, scalars.len())?;
    let bases = &pk.h_bases[1..=scalars.len()];
    Ok(backend.g1_generator() + backend.msm_g1(bases, scalars)?)
}

/// Samples `r = to_r(fresh)` until `x + y·r` is invertible.
fn sign_with_fresh_r<B, R, F>(
    backend: &B,
    keypair: &KeyPair<B>,
    scalars: &[B::Scalar],
    rng: &mut R,
    to_r: F,
) -> Result<BBSplusSignature<B>, Error>
where
    B: GroupBackend,
    R: RngCore + CryptoRng,
    F: Fn(B::Scalar) -> B::Scalar,
{
    for attempt in 1..=MAX_SIGN_RETRIES {
        let r = to_r(backend.random_scalar(rng));
        match core_sign(backend, keypair.private_key(), keypair.public_key(), r, scalars) {
            Ok(a) => return Ok(BBSplusSignature { a, r }),
            Err(Error::ArithmeticFailure(reason)) => {
                log::warn!("resampling r (attempt {}/{}): {}", attempt, MAX_SIGN_RETRIES, reason);
            }
            Err(e) => return Err(e),
        }
    }

    Err(Error::ArithmeticFailure(format!(
        "no invertible x + y·r after {} attempts",
        MAX_SIGN_RETRIES
    )))
}

/// `A = (g1 · h0^r · Π h_i^{m_i})^{(x + y·r)^{-1}}`
pub(crate) fn core_sign<B: GroupBackend>(
    backend: &B,
    sk: &BBSplusSecretKey<B>,
    pk: &BBSplusPublicKey<B>,
    r: B::Scalar,
    scalars: &[B::Scalar],
) -> Result<B::G1, Error> {
    let denom = sk.x + sk.y * r;
    let denom_inv = Option::<B::Scalar>::from(denom.invert())
        .ok_or_else(|| Error::ArithmeticFailure("x + y·r ≡ 0 (mod p)".to_owned()))?;

    let u = attribute_commitment(backend, pk, scalars)? + pk.h_bases[0] * r;
    let a = u * denom_inv;

    if bool::from(a.is_identity()) {
        return Err(Error::ArithmeticFailure("A == Identity_G1".to_owned()));
    }

    Ok(a)
}

pub(crate) fn core_verify<B, T>(
    backend: &B,
    pk: &BBSplusPublicKey<B>,
    signature: &BBSplusSignature<B>,
    attributes: &[T],
) -> Result<(), Error>
where
    B: GroupBackend,
    T: AsRef<[u8]>,
{
    check_attribute_count(pk, attributes.len())?;
    let scalars = attributes_to_scalars(backend, attributes)?;

    if bool::from(signature.a.is_identity()) {
        return Err(Error::PairingMismatch);
    }

    let commit = attribute_commitment(backend, pk, &scalars)? + pk.h_bases[0] * signature.r;
    let left_g2 = pk.X + pk.Y * signature.r;

    // e(A, X·Y^r) · e(commit, g2)^{-1} == 1
    if backend.pairing_product_is_identity(&[(signature.a, left_g2), (-commit, backend.g2_generator())]) {
        Ok(())
    } else {
        Err(Error::PairingMismatch)
    }
}

#[cfg(all(test, feature = "bls12_381"))]
mod tests {
    use super::*;
    use crate::backend::bls12_381::{Bls12381Sha256Backend, Bls12381Shake256Backend};
    use rand::{rngs::StdRng, SeedableRng};
    use std::cell::Cell;

    type Scalar = <Bls12381Sha256Backend as GroupBackend>::Scalar;
    type G1 = <Bls12381Sha256Backend as GroupBackend>::G1;

    const ATTRIBUTES: [&str; 5] = ["alice", "30", "US", "gold", "2024"];

    fn setup(seed: u64) -> (Bls12381Sha256Backend, KeyPair<Bls12381Sha256Backend>, StdRng) {
        let backend = Bls12381Sha256Backend::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let keypair = KeyPair::generate(&backend, 5, &mut rng).unwrap();
        (backend, keypair, rng)
    }

    #[test]
    fn sign_then_verify() {
        let (backend, keypair, mut rng) = setup(1);
        let signature = BBSplusSignature::sign(&backend, &keypair, &ATTRIBUTES, &mut rng).unwrap();
        assert!(signature.verify(&backend, keypair.public_key(), &ATTRIBUTES).unwrap());

        // fewer attributes than the maximum, including none at all
        let short = BBSplusSignature::sign(&backend, &keypair, &ATTRIBUTES[..2], &mut rng).unwrap();
        assert!(short.verify(&backend, keypair.public_key(), &ATTRIBUTES[..2]).unwrap());
        assert!(!short.verify(&backend, keypair.public_key(), &ATTRIBUTES[..3]).unwrap());
        let empty: [&str; 0] = [];
        let none = BBSplusSignature::sign(&backend, &keypair, &empty, &mut rng).unwrap();
        assert!(none.verify(&backend, keypair.public_key(), &empty).unwrap());
    }

    #[test]
    fn signature_matches_definition() {
        let (backend, keypair, mut rng) = setup(2);
        let signature = BBSplusSignature::sign(&backend, &keypair, &ATTRIBUTES, &mut rng).unwrap();
        let sk = keypair.private_key();
        let pk = keypair.public_key();
        let scalars = attributes_to_scalars(&backend, &ATTRIBUTES).unwrap();

        let mut u = backend.g1_generator() + pk.h_bases[0] * signature.r;
        for (i, m) in scalars.iter().enumerate() {
            u += pk.h_bases[i + 1] * m;
        }
        assert_eq!(signature.a * (sk.x + sk.y * signature.r), u);
    }

    #[test]
    fn too_many_attributes() {
        let (backend, keypair, mut rng) = setup(3);
        let six = ["a", "b", "c", "d", "e", "f"];
        assert!(matches!(
            BBSplusSignature::sign(&backend, &keypair, &six, &mut rng),
            Err(Error::InvalidArgument(_))
        ));

        let signature = BBSplusSignature::sign(&backend, &keypair, &ATTRIBUTES, &mut rng).unwrap();
        assert!(matches!(
            signature.verify(&backend, keypair.public_key(), &six),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn tampering_is_detected() {
        let (backend, keypair, mut rng) = setup(4);
        let pk = keypair.public_key();
        let signature = BBSplusSignature::sign(&backend, &keypair, &ATTRIBUTES, &mut rng).unwrap();

        for i in 0..ATTRIBUTES.len() {
            let mut flipped = ATTRIBUTES;
            flipped[i] = "tampered";
            assert!(!signature.verify(&backend, pk, &flipped).unwrap(), "attribute {}", i);
        }

        let mut swapped = ATTRIBUTES;
        swapped.swap(0, 1);
        assert!(!signature.verify(&backend, pk, &swapped).unwrap());

        let other_r = BBSplusSignature { a: signature.a, r: signature.r + Scalar::ONE };
        assert!(!other_r.verify(&backend, pk, &ATTRIBUTES).unwrap());

        let other_a = BBSplusSignature { a: signature.a + backend.g1_generator(), r: signature.r };
        assert!(!other_a.verify(&backend, pk, &ATTRIBUTES).unwrap());

        let identity = BBSplusSignature { a: G1::identity(), r: signature.r };
        assert!(!identity.verify(&backend, pk, &ATTRIBUTES).unwrap());

        let other_key = KeyPair::generate(&backend, 5, &mut rng).unwrap();
        assert!(!signature.verify(&backend, other_key.public_key(), &ATTRIBUTES).unwrap());
    }

    #[test]
    fn update_attributes_keeps_r() {
        let (backend, keypair, mut rng) = setup(5);
        let pk = keypair.public_key();
        let signature = BBSplusSignature::sign(&backend, &keypair, &ATTRIBUTES, &mut rng).unwrap();

        let updates = BTreeMap::from([(1usize, "31"), (3usize, "platinum")]);
        let updated = signature.update_attributes(&backend, &keypair, &ATTRIBUTES, &updates).unwrap();
        assert_eq!(updated.r, signature.r);
        assert_ne!(updated.a, signature.a);

        let new_attributes = ["alice", "31", "US", "platinum", "2024"];
        assert!(updated.verify(&backend, pk, &new_attributes).unwrap());
        assert!(!updated.verify(&backend, pk, &ATTRIBUTES).unwrap());
        // the original value is untouched
        assert!(signature.verify(&backend, pk, &ATTRIBUTES).unwrap());

        let noop: BTreeMap<usize, &str> = BTreeMap::new();
        assert_eq!(signature.update_attributes(&backend, &keypair, &ATTRIBUTES, &noop).unwrap(), signature);

        let out_of_range = BTreeMap::from([(5usize, "x")]);
        assert!(matches!(
            signature.update_attributes(&backend, &keypair, &ATTRIBUTES, &out_of_range),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn re_randomise_changes_both_components() {
        let backend = Bls12381Shake256Backend::new();
        let mut rng = StdRng::seed_from_u64(6);
        let keypair = KeyPair::generate(&backend, 5, &mut rng).unwrap();
        let signature = BBSplusSignature::sign(&backend, &keypair, &ATTRIBUTES, &mut rng).unwrap();

        let fresh = signature.re_randomise(&backend, &keypair, &ATTRIBUTES, &mut rng).unwrap();
        assert_ne!(fresh.a, signature.a);
        assert_ne!(fresh.r, signature.r);
        assert!(fresh.verify(&backend, keypair.public_key(), &ATTRIBUTES).unwrap());
    }

    #[test]
    fn degenerate_denominator_is_an_arithmetic_failure() {
        let (backend, keypair, _) = setup(7);
        let sk = keypair.private_key();
        // r = -x / y makes x + y·r vanish
        let r = -(sk.x * Option::<Scalar>::from(sk.y.invert()).unwrap());
        let scalars = attributes_to_scalars(&backend, &ATTRIBUTES).unwrap();
        assert!(matches!(
            core_sign(&backend, sk, keypair.public_key(), r, &scalars),
            Err(Error::ArithmeticFailure(_))
        ));

        let degenerate = BBSplusSignature { a: backend.g1_generator(), r };
        let updates = BTreeMap::from([(0usize, "bob")]);
        assert!(matches!(
            degenerate.update_attributes(&backend, &keypair, &ATTRIBUTES, &updates),
            Err(Error::ArithmeticFailure(_))
        ));
    }

    #[test]
    fn resampling_gives_up_after_max_retries() {
        let (backend, keypair, mut rng) = setup(9);
        let sk = keypair.private_key();
        let degenerate_r = -(sk.x * Option::<Scalar>::from(sk.y.invert()).unwrap());
        let scalars = attributes_to_scalars(&backend, &ATTRIBUTES).unwrap();

        let attempts = Cell::new(0usize);
        let result = sign_with_fresh_r(&backend, &keypair, &scalars, &mut rng, |_| {
            attempts.set(attempts.get() + 1);
            degenerate_r
        });
        assert!(matches!(result, Err(Error::ArithmeticFailure(_))));
        assert_eq!(attempts.get(), MAX_SIGN_RETRIES);
    }

    #[test]
    fn degenerate_r_is_resampled() {
        let (backend, keypair, mut rng) = setup(10);
        let sk = keypair.private_key();
        let degenerate_r = -(sk.x * Option::<Scalar>::from(sk.y.invert()).unwrap());
        let scalars = attributes_to_scalars(&backend, &ATTRIBUTES).unwrap();

        let attempts = Cell::new(0usize);
        let signature = sign_with_fresh_r(&backend, &keypair, &scalars, &mut rng, |fresh| {
            attempts.set(attempts.get() + 1);
            if attempts.get() == 1 {
                degenerate_r
            } else {
                fresh
            }
        })
        .unwrap();

        assert_eq!(attempts.get(), 2);
        assert_ne!(signature.r, degenerate_r);
        assert!(signature.verify(&backend, keypair.public_key(), &ATTRIBUTES).unwrap());
    }

    #[test]
    fn signature_bytes() {
        let (backend, keypair, mut rng) = setup(8);
        let signature = BBSplusSignature::sign(&backend, &keypair, &ATTRIBUTES, &mut rng).unwrap();
        let bytes = signature.to_bytes(&backend);
        assert_eq!(bytes.len(), 80);
        assert_eq!(BBSplusSignature::from_bytes(&backend, &bytes).unwrap(), signature);
        assert!(matches!(
            BBSplusSignature::<Bls12381Sha256Backend>::from_bytes(&backend, &bytes[..79]),
            Err(Error::DeserializationError(_))
        ));

        let json = serde_json::to_string(&signature).unwrap();
        let back: BBSplusSignature<Bls12381Sha256Backend> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, signature);
    }
}
