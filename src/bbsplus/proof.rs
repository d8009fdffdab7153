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
    ciphersuites::CHALLENGE_DST,
    keys::BBSplusPublicKey,
    signature::{check_attribute_count, BBSplusSignature},
};
use crate::{
    backend::GroupBackend,
    errors::Error,
    utils::{
        message::{attributes_to_scalars, map_attribute_to_scalar},
        util::{check_disclosed_indexes, get_remaining_indexes, i2osp, ByteReader},
    },
};

/// Non-interactive proof of knowledge of a signature over `total` attributes, revealing the
/// attributes in `disclosed` and hiding the rest.
///
/// `A` is carried in the clear, so two proofs derived from the same signature share it. Use
/// [`super::blinded::BlindedDisclosureProof`] when presentations must be unlinkable.
#[derive(Clone, Debug)]
pub struct DisclosureProof<B: GroupBackend> {
    pub A: B::G1,
    pub T1: B::G1,
    pub T2: B::G2,
    pub challenge: B::Scalar,
    pub z_r: B::Scalar,
    /// Responses for the hidden indexes.
    pub z_m: BTreeMap<usize, B::Scalar>,
    /// Disclosed attribute values by index.
    pub disclosed: BTreeMap<usize, Vec<u8>>,
    pub total: usize,
}

impl<B: GroupBackend> PartialEq for DisclosureProof<B> {
    fn eq(&self, other: &Self) -> bool {
        self.A == other.A
            && self.T1 == other.T1
            && self.T2 == other.T2
            && self.challenge == other.challenge
            && self.z_r == other.z_r
            && self.z_m == other.z_m
            && self.disclosed == other.disclosed
            && self.total == other.total
    }
}

impl<B: GroupBackend> Eq for DisclosureProof<B> {}

impl<B: GroupBackend> DisclosureProof<B> {
    /// # Description
    /// Generates a selective disclosure proof for `signature` over `attributes`.
    ///
    /// # Inputs:
    /// * `backend` (REQUIRED), the group backend
    /// * `pk` (REQUIRED), the issuer public key
    /// * `signature` (REQUIRED), a signature on `attributes`
    /// * `attributes` (REQUIRED), the full attribute vector
    /// * `disclosed_indexes` (REQUIRED), 0-based indexes to reveal, each in `[0, len(attributes))`, no duplicates
    /// * `ph` (OPTIONAL), a presentation header bound into the challenge. Defaults to the empty string
    /// * `rng` (REQUIRED), a cryptographically secure random source for the commitment randomness
    ///
    /// # Output:
    /// a [`DisclosureProof`] or [`Error`].
    ///
    pub fn prove<T, R>(
        backend: &B,
        pk: &BBSplusPublicKey<B>,
        signature: &BBSplusSignature<B>,
        attributes: &[T],
        disclosed_indexes: &[usize],
        ph: Option<&[u8]>,
        rng: &mut R,
    ) -> Result<Self, Error>
    where
        T: AsRef<[u8]>,
        R: RngCore + CryptoRng,
    {
        let total = attributes.len();
        check_attribute_count(pk, total)?;
        let disclosed_indexes = check_disclosed_indexes(total, disclosed_indexes)?;
        let undisclosed_indexes = get_remaining_indexes(total, &disclosed_indexes);

        let scalars = attributes_to_scalars(backend, attributes)?;
        let disclosed: BTreeMap<usize, Vec<u8>> = disclosed_indexes
            .iter()
            .map(|&i| (i, attributes[i].as_ref().to_vec()))
            .collect();

        let r_tilde = backend.random_scalar(rng);
        let m_tilde: Vec<B::Scalar> = undisclosed_indexes.iter().map(|_| backend.random_scalar(rng)).collect();

        let (T1, T2) = proof_init(backend, pk, &undisclosed_indexes, r_tilde, &m_tilde)?;
        let challenge = proof_challenge_calculate(backend, pk, &signature.a, &T1, &T2, total, &disclosed, ph)?;

        if bool::from(challenge.is_zero()) {
            return Err(Error::ArithmeticFailure("challenge == 0".to_owned()));
        }

        let z_r = r_tilde + challenge * signature.r;
        let z_m = undisclosed_indexes
            .iter()
            .zip(m_tilde)
            .map(|(&j, m_t)| (j, m_t + challenge * scalars[j]))
            .collect();

        log::debug!(
            "disclosure proof over {} attributes, {} disclosed",
            total,
            disclosed_indexes.len()
        );

        Ok(Self {
            A: signature.a,
            T1,
            T2,
            challenge,
            z_r,
            z_m,
            disclosed,
            total,
        })
    }

    /// # Description
    /// Verifies the proof against the issuer public key and presentation header.
    ///
    /// # Output:
    /// `Ok(true)` if both the challenge and the pairing equation check out, `Ok(false)` otherwise.
    /// [`Error`] is returned only for structurally inconsistent proofs.
    ///
    pub fn verify(&self, backend: &B, pk: &BBSplusPublicKey<B>, ph: Option<&[u8]>) -> Result<bool, Error> {
        match core_proof_verify(backend, pk, self, ph) {
            Ok(()) => {
                log::debug!("disclosure proof accepted");
                Ok(true)
            }
            Err(e) if e.is_rejection() => {
                log::debug!("disclosure proof rejected: {}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn disclosed_attributes(&self) -> &BTreeMap<usize, Vec<u8>> {
        &self.disclosed
    }

    pub fn disclosed_indexes(&self) -> Vec<usize> {
        self.disclosed.keys().copied().collect()
    }

    pub fn hidden_indexes(&self) -> Vec<usize> {
        self.z_m.keys().copied().collect()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// `A || T1 || T2 || c || z_r || I2OSP(total, 8) || I2OSP(|D|, 8) || (I2OSP(i, 8) || I2OSP(len, 8) || v_i)* || z_m*`
    pub fn to_bytes(&self, backend: &B) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.extend_from_slice(&backend.g1_to_bytes(&self.A));
        bytes.extend_from_slice(&backend.g1_to_bytes(&self.T1));
        bytes.extend_from_slice(&backend.g2_to_bytes(&self.T2));
        bytes.extend_from_slice(&backend.scalar_to_bytes(&self.challenge));
        bytes.extend_from_slice(&backend.scalar_to_bytes(&self.z_r));
        bytes.extend_from_slice(&i2osp(self.total, 8));
        bytes.extend_from_slice(&disclosed_to_bytes(&self.disclosed));
        self.z_m
            .values()
            .for_each(|z| bytes.extend_from_slice(&backend.scalar_to_bytes(z)));
        bytes
    }

    pub fn from_bytes(backend: &B, bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = ByteReader::new(bytes);
        let A = backend.g1_from_bytes(reader.take(B::G1_BYTES)?)?;
        let T1 = backend.g1_from_bytes(reader.take(B::G1_BYTES)?)?;
        let T2 = backend.g2_from_bytes(reader.take(B::G2_BYTES)?)?;
        let challenge = backend.scalar_from_bytes(reader.take(B::SCALAR_BYTES)?)?;
        let z_r = backend.scalar_from_bytes(reader.take(B::SCALAR_BYTES)?)?;
        let total = reader.read_u64()?;
        let disclosed = read_disclosed(&mut reader, total)?;
        let z_m = read_responses(backend, &mut reader, total, &disclosed)?;
        reader.finish()?;

        Ok(Self {
            A,
            T1,
            T2,
            challenge,
            z_r,
            z_m,
            disclosed,
            total,
        })
    }
}

impl<B: GroupBackend> Serialize for DisclosureProof<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(self.to_bytes(&B::default())))
    }
}

impl<'de, B: GroupBackend> Deserialize<'de> for DisclosureProof<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(encoded).map_err(de::Error::custom)?;
        Self::from_bytes(&B::default(), &bytes).map_err(de::Error::custom)
    }
}

/// `T1 = h0^r̃ · Π_{j∈H} h_{j+1}^{m̃_j}`, `T2 = Y^r̃`
fn proof_init<B: GroupBackend>(
    backend: &B,
    pk: &BBSplusPublicKey<B>,
    undisclosed_indexes: &[usize],
    r_tilde: B::Scalar,
    m_tilde: &[B::Scalar],
) -> Result<(B::G1, B::G2), Error> {
    let mut bases = Vec::with_capacity(undisclosed_indexes.len() + 1);
    bases.push(pk.h_bases[0]);
    bases.extend(undisclosed_indexes.iter().map(|&j| pk.h_bases[j + 1]));

    let mut exponents = Vec::with_capacity(m_tilde.len() + 1);
    exponents.push(r_tilde);
    exponents.extend_from_slice(m_tilde);

    let T1 = backend.msm_g1(&bases, &exponents)?;
    let T2 = pk.Y * r_tilde;
    Ok((T1, T2))
}

#[allow(clippy::too_many_arguments)]
fn proof_challenge_calculate<B: GroupBackend>(
    backend: &B,
    pk: &BBSplusPublicKey<B>,
    A: &B::G1,
    T1: &B::G1,
    T2: &B::G2,
    total: usize,
    disclosed: &BTreeMap<usize, Vec<u8>>,
    ph: Option<&[u8]>,
) -> Result<B::Scalar, Error> {
    let T3 = backend.pair(A, T2);

    let mut c_arr: Vec<u8> = public_key_transcript(backend, pk, total);
    c_arr.extend_from_slice(&backend.g1_to_bytes(A));
    c_arr.extend_from_slice(&backend.g1_to_bytes(T1));
    c_arr.extend_from_slice(&backend.g2_to_bytes(T2));
    c_arr.extend_from_slice(&backend.gt_to_bytes(&T3));
    c_arr.extend_from_slice(&i2osp(total, 8));
    c_arr.extend_from_slice(&disclosed_to_bytes(disclosed));
    c_arr.extend_from_slice(&ph_to_bytes(ph));

    backend.hash_to_scalar(CHALLENGE_DST, &c_arr)
}

fn core_proof_verify<B: GroupBackend>(
    backend: &B,
    pk: &BBSplusPublicKey<B>,
    proof: &DisclosureProof<B>,
    ph: Option<&[u8]>,
) -> Result<(), Error> {
    let undisclosed_indexes = check_proof_shape(pk, proof.total, &proof.disclosed, &proof.z_m)?;

    if bool::from(proof.challenge.is_zero()) {
        return Err(Error::ChallengeMismatch);
    }
    if bool::from(proof.A.is_identity()) {
        return Err(Error::PairingMismatch);
    }

    let challenge = proof_challenge_calculate(
        backend,
        pk,
        &proof.A,
        &proof.T1,
        &proof.T2,
        proof.total,
        &proof.disclosed,
        ph,
    )?;
    if challenge != proof.challenge {
        return Err(Error::ChallengeMismatch);
    }

    let c = proof.challenge;

    // h0^{z_r} · Π_{j∈H} h_{j+1}^{z_m[j]}
    let mut bases = Vec::with_capacity(undisclosed_indexes.len() + 1);
    bases.push(pk.h_bases[0]);
    bases.extend(undisclosed_indexes.iter().map(|&j| pk.h_bases[j + 1]));
    let mut responses = Vec::with_capacity(undisclosed_indexes.len() + 1);
    responses.push(proof.z_r);
    responses.extend(proof.z_m.values().copied());
    let left_commit = backend.msm_g1(&bases, &responses)?;

    // g1^c · Π_{i∈D} h_{i+1}^{c·m_i}
    let mut disclosed_bases = Vec::with_capacity(proof.disclosed.len());
    let mut disclosed_exponents = Vec::with_capacity(proof.disclosed.len());
    for (&i, value) in &proof.disclosed {
        disclosed_bases.push(pk.h_bases[i + 1]);
        disclosed_exponents.push(c * map_attribute_to_scalar(backend, value)?.value);
    }
    let B_agg = backend.g1_generator() * c + backend.msm_g1(&disclosed_bases, &disclosed_exponents)? + left_commit
        - proof.T1;

    let V = pk.X * c + pk.Y * proof.z_r - proof.T2;

    // e(A^c, V) == e(B, g2^c)
    let terms = [(proof.A * c, V), (B_agg, -(backend.g2_generator() * c))];
    if backend.pairing_product_is_identity(&terms) {
        Ok(())
    } else {
        Err(Error::PairingMismatch)
    }
}

/// Checks that `disclosed` and `responses` partition `[0, total)` and that `total` fits the key.
/// Returns the hidden indexes in ascending order.
pub(crate) fn check_proof_shape<B: GroupBackend, V>(
    pk: &BBSplusPublicKey<B>,
    total: usize,
    disclosed: &BTreeMap<usize, Vec<u8>>,
    responses: &BTreeMap<usize, V>,
) -> Result<Vec<usize>, Error> {
    check_attribute_count(pk, total)?;
    let disclosed_indexes: Vec<usize> = disclosed.keys().copied().collect();
    let disclosed_indexes = check_disclosed_indexes(total, &disclosed_indexes)?;
    let undisclosed_indexes = get_remaining_indexes(total, &disclosed_indexes);

    if !responses.keys().copied().eq(undisclosed_indexes.iter().copied()) {
        return Err(Error::InvalidArgument(
            "responses do not match the hidden indexes".to_owned(),
        ));
    }
    Ok(undisclosed_indexes)
}

/// `X || Y || h_0 || … || h_total`
pub(crate) fn public_key_transcript<B: GroupBackend>(backend: &B, pk: &BBSplusPublicKey<B>, total: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&backend.g2_to_bytes(&pk.X));
    bytes.extend_from_slice(&backend.g2_to_bytes(&pk.Y));
    pk.h_bases
        .iter()
        .take(total + 1)
        .for_each(|h| bytes.extend_from_slice(&backend.g1_to_bytes(h)));
    bytes
}

/// `I2OSP(|D|, 8) || (I2OSP(i, 8) || I2OSP(len(v_i), 8) || v_i)` for `i` ascending.
pub(crate) fn disclosed_to_bytes(disclosed: &BTreeMap<usize, Vec<u8>>) -> Vec<u8> {
    let mut bytes = i2osp(disclosed.len(), 8);
    for (&i, value) in disclosed {
        bytes.extend_from_slice(&i2osp(i, 8));
        bytes.extend_from_slice(&i2osp(value.len(), 8));
        bytes.extend_from_slice(value);
    }
    bytes
}

pub(crate) fn ph_to_bytes(ph: Option<&[u8]>) -> Vec<u8> {
    let ph = ph.unwrap_or(b"");
    [i2osp(ph.len(), 8).as_slice(), ph].concat()
}

pub(crate) fn read_disclosed(reader: &mut ByteReader<'_>, total: usize) -> Result<BTreeMap<usize, Vec<u8>>, Error> {
    let count = reader.read_u64()?;
    if count > total {
        return Err(Error::DeserializationError(format!(
            "{} disclosed attributes out of {}",
            count, total
        )));
    }

    let mut disclosed = BTreeMap::new();
    let mut previous: Option<usize> = None;
    for _ in 0..count {
        let index = reader.read_u64()?;
        if index >= total || previous.map_or(false, |p| index <= p) {
            return Err(Error::DeserializationError(format!(
                "disclosed index {} not ascending in [0, {})",
                index, total
            )));
        }
        let len = reader.read_u64()?;
        disclosed.insert(index, reader.take(len)?.to_vec());
        previous = Some(index);
    }
    Ok(disclosed)
}

pub(crate) fn read_responses<B: GroupBackend>(
    backend: &B,
    reader: &mut ByteReader<'_>,
    total: usize,
    disclosed: &BTreeMap<usize, Vec<u8>>,
) -> Result<BTreeMap<usize, B::Scalar>, Error> {
    (0..total)
        .filter(|i| !disclosed.contains_key(i))
        .map(|j| Ok((j, backend.scalar_from_bytes(reader.take(B::SCALAR_BYTES)?)?)))
        .collect()
}

#[cfg(all(test, feature = "bls12_381"))]
mod tests {
    use super::*;
    use crate::{
        backend::bls12_381::{Bls12381Sha256Backend, Bls12381Shake256Backend},
        keys::pair::KeyPair,
    };
    use rand::{rngs::StdRng, SeedableRng};

    type Scalar = <Bls12381Sha256Backend as GroupBackend>::Scalar;

    const ATTRIBUTES: [&str; 5] = ["alice", "30", "US", "gold", "2024"];

    fn setup(
        seed: u64,
    ) -> (
        Bls12381Sha256Backend,
        KeyPair<Bls12381Sha256Backend>,
        BBSplusSignature<Bls12381Sha256Backend>,
        StdRng,
    ) {
        let backend = Bls12381Sha256Backend::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let keypair = KeyPair::generate(&backend, 5, &mut rng).unwrap();
        let signature = BBSplusSignature::sign(&backend, &keypair, &ATTRIBUTES, &mut rng).unwrap();
        (backend, keypair, signature, rng)
    }

    #[test]
    fn every_disclosure_pattern_verifies() {
        let (backend, keypair, signature, mut rng) = setup(1);
        let pk = keypair.public_key();

        let patterns: [&[usize]; 6] = [&[], &[0], &[1, 2], &[4, 0], &[0, 1, 2, 3], &[0, 1, 2, 3, 4]];
        for disclosed in patterns {
            let proof =
                DisclosureProof::prove(&backend, pk, &signature, &ATTRIBUTES, disclosed, None, &mut rng).unwrap();
            assert!(proof.verify(&backend, pk, None).unwrap(), "disclosed {:?}", disclosed);
            assert_eq!(proof.disclosed_indexes().len() + proof.hidden_indexes().len(), 5);
        }
    }

    #[test]
    fn disclosed_values_are_carried() {
        let (backend, keypair, signature, mut rng) = setup(2);
        let proof = DisclosureProof::prove(
            &backend,
            keypair.public_key(),
            &signature,
            &ATTRIBUTES,
            &[2, 1],
            None,
            &mut rng,
        )
        .unwrap();

        assert_eq!(proof.total(), 5);
        assert_eq!(proof.disclosed_indexes(), vec![1, 2]);
        assert_eq!(proof.hidden_indexes(), vec![0, 3, 4]);
        assert_eq!(proof.disclosed_attributes()[&1], b"30".to_vec());
        assert_eq!(proof.disclosed_attributes()[&2], b"US".to_vec());
        assert_eq!(proof.A, signature.a);
    }

    #[test]
    fn tampered_proofs_are_rejected() {
        let (backend, keypair, signature, mut rng) = setup(3);
        let pk = keypair.public_key();
        let proof =
            DisclosureProof::prove(&backend, pk, &signature, &ATTRIBUTES, &[1, 2], None, &mut rng).unwrap();

        let mut value = proof.clone();
        value.disclosed.insert(1, b"31".to_vec());
        assert!(!value.verify(&backend, pk, None).unwrap());

        let mut challenge = proof.clone();
        challenge.challenge += Scalar::ONE;
        assert!(!challenge.verify(&backend, pk, None).unwrap());

        let mut zero = proof.clone();
        zero.challenge = Scalar::ZERO;
        assert!(!zero.verify(&backend, pk, None).unwrap());

        let mut response = proof.clone();
        if let Some(z) = response.z_m.get_mut(&0) {
            *z += Scalar::ONE;
        }
        assert!(!response.verify(&backend, pk, None).unwrap());

        let mut z_r = proof.clone();
        z_r.z_r += Scalar::ONE;
        assert!(!z_r.verify(&backend, pk, None).unwrap());

        let mut t1 = proof.clone();
        t1.T1 += backend.g1_generator();
        assert!(!t1.verify(&backend, pk, None).unwrap());

        let mut identity = proof.clone();
        identity.A = <Bls12381Sha256Backend as GroupBackend>::G1::identity();
        assert!(!identity.verify(&backend, pk, None).unwrap());

        let other = KeyPair::generate(&backend, 5, &mut rng).unwrap();
        assert!(!proof.verify(&backend, other.public_key(), None).unwrap());
    }

    #[test]
    fn presentation_header_is_bound() {
        let (backend, keypair, signature, mut rng) = setup(4);
        let pk = keypair.public_key();
        let proof = DisclosureProof::prove(
            &backend,
            pk,
            &signature,
            &ATTRIBUTES,
            &[0],
            Some(b"nonce-1"),
            &mut rng,
        )
        .unwrap();

        assert!(proof.verify(&backend, pk, Some(b"nonce-1")).unwrap());
        assert!(!proof.verify(&backend, pk, Some(b"nonce-2")).unwrap());
        assert!(!proof.verify(&backend, pk, None).unwrap());
    }

    #[test]
    fn invalid_arguments() {
        let (backend, keypair, signature, mut rng) = setup(5);
        let pk = keypair.public_key();

        for disclosed in [&[5usize][..], &[1usize, 1][..]] {
            assert!(matches!(
                DisclosureProof::prove(&backend, pk, &signature, &ATTRIBUTES, disclosed, None, &mut rng),
                Err(Error::InvalidArgument(_))
            ));
        }

        let proof =
            DisclosureProof::prove(&backend, pk, &signature, &ATTRIBUTES, &[1, 2], None, &mut rng).unwrap();

        let mut missing_response = proof.clone();
        missing_response.z_m.remove(&4);
        assert!(matches!(
            missing_response.verify(&backend, pk, None),
            Err(Error::InvalidArgument(_))
        ));

        let mut overlapping = proof.clone();
        overlapping.disclosed.insert(0, b"alice".to_vec());
        assert!(matches!(overlapping.verify(&backend, pk, None), Err(Error::InvalidArgument(_))));

        let mut too_long = proof.clone();
        too_long.total = 6;
        assert!(matches!(too_long.verify(&backend, pk, None), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn fresh_randomness_per_proof() {
        let backend = Bls12381Shake256Backend::new();
        let mut rng = StdRng::seed_from_u64(6);
        let keypair = KeyPair::generate(&backend, 5, &mut rng).unwrap();
        let pk = keypair.public_key();
        let signature = BBSplusSignature::sign(&backend, &keypair, &ATTRIBUTES, &mut rng).unwrap();

        let a = DisclosureProof::prove(&backend, pk, &signature, &ATTRIBUTES, &[1, 2], None, &mut rng).unwrap();
        let b = DisclosureProof::prove(&backend, pk, &signature, &ATTRIBUTES, &[1, 2], None, &mut rng).unwrap();
        assert_ne!(a.T1, b.T1);
        assert_ne!(a.T2, b.T2);
        assert_ne!(a.challenge, b.challenge);
        assert_ne!(a.z_r, b.z_r);
        assert_ne!(a.z_m, b.z_m);
        assert!(a.verify(&backend, pk, None).unwrap() && b.verify(&backend, pk, None).unwrap());
    }

    #[test]
    fn proof_bytes() {
        let (backend, keypair, signature, mut rng) = setup(7);
        let pk = keypair.public_key();
        let proof =
            DisclosureProof::prove(&backend, pk, &signature, &ATTRIBUTES, &[1, 2], None, &mut rng).unwrap();

        let bytes = proof.to_bytes(&backend);
        // A, T1, T2, c, z_r, total, |D|, two entries of 2-byte values, three responses
        assert_eq!(bytes.len(), 48 + 48 + 96 + 32 + 32 + 8 + 8 + 2 * (8 + 8 + 2) + 3 * 32);
        let decoded = DisclosureProof::from_bytes(&backend, &bytes).unwrap();
        assert_eq!(decoded, proof);
        assert!(decoded.verify(&backend, pk, None).unwrap());

        assert!(DisclosureProof::<Bls12381Sha256Backend>::from_bytes(&backend, &bytes[..bytes.len() - 1]).is_err());
        let mut trailing = bytes.clone();
        trailing.push(0);
        assert!(DisclosureProof::<Bls12381Sha256Backend>::from_bytes(&backend, &trailing).is_err());

        let json = serde_json::to_string(&proof).unwrap();
        let back: DisclosureProof<Bls12381Sha256Backend> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, proof);
    }
}
