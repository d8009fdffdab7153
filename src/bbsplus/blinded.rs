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

//! Holder-side presentation that needs no secret key.
//!
//! The holder blinds its signature with a fresh `ρ`: `Ā = A·ρ`, `B̄ = U·ρ` where
//! `U = g1 + r·h0 + Σ m_i·h_{i+1}`. Since `Ā·(x + y·r) = B̄`, the proof shows knowledge of
//! `(ρ⁻¹, r, {m_j}_{j∈H})` such that
//!
//! * `g1 + Σ_{i∈D} m_i·h_{i+1} = ρ⁻¹·B̄ − r·h0 − Σ_{j∈H} m_j·h_{j+1}` in G1,
//! * `e(Ā, Y)^r = e(B̄, g2) / e(Ā, X)` in GT.
//!
//! Every presentation carries a fresh `(Ā, B̄)`, so two proofs from one signature cannot be
//! linked through the signature itself.

use std::collections::BTreeMap;

use ff::Field;
use group::Group;
use rand::{CryptoRng, RngCore};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::{
    ciphersuites::BLINDED_CHALLENGE_DST,
    keys::BBSplusPublicKey,
    proof::{check_proof_shape, disclosed_to_bytes, ph_to_bytes, public_key_transcript, read_disclosed, read_responses},
    signature::{attribute_commitment, check_attribute_count, BBSplusSignature},
};
use crate::{
    backend::GroupBackend,
    errors::Error,
    utils::{
        message::{attributes_to_scalars, map_attribute_to_scalar},
        util::{check_disclosed_indexes, get_remaining_indexes, i2osp, ByteReader},
    },
};

#[derive(Clone, Debug)]
pub struct BlindedDisclosureProof<B: GroupBackend> {
    pub Abar: B::G1,
    pub Bbar: B::G1,
    pub challenge: B::Scalar,
    pub z_rho: B::Scalar,
    pub z_r: B::Scalar,
    pub z_m: BTreeMap<usize, B::Scalar>,
    pub disclosed: BTreeMap<usize, Vec<u8>>,
    pub total: usize,
}

impl<B: GroupBackend> PartialEq for BlindedDisclosureProof<B> {
    fn eq(&self, other: &Self) -> bool {
        self.Abar == other.Abar
            && self.Bbar == other.Bbar
            && self.challenge == other.challenge
            && self.z_rho == other.z_rho
            && self.z_r == other.z_r
            && self.z_m == other.z_m
            && self.disclosed == other.disclosed
            && self.total == other.total
    }
}

impl<B: GroupBackend> Eq for BlindedDisclosureProof<B> {}

struct BlindedInitResult<B: GroupBackend> {
    Abar: B::G1,
    Bbar: B::G1,
    T_g1: B::G1,
    T_gt: B::Gt,
}

impl<B: GroupBackend> BlindedDisclosureProof<B> {
    /// # Description
    /// Generates an unlinkable selective disclosure proof using only the public key.
    ///
    /// # Inputs:
    /// * `backend` (REQUIRED), the group backend
    /// * `pk` (REQUIRED), the issuer public key
    /// * `signature` (REQUIRED), a signature on `attributes`
    /// * `attributes` (REQUIRED), the full attribute vector
    /// * `disclosed_indexes` (REQUIRED), 0-based indexes to reveal, no duplicates
    /// * `ph` (OPTIONAL), a presentation header bound into the challenge
    /// * `rng` (REQUIRED), a cryptographically secure random source
    ///
    /// # Output:
    /// a [`BlindedDisclosureProof`] or [`Error`].
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

        let rho = backend.random_scalar(rng);
        let rho_inv = Option::<B::Scalar>::from(rho.invert())
            .ok_or_else(|| Error::ArithmeticFailure("rho is not invertible".to_owned()))?;
        let rho_tilde = backend.random_scalar(rng);
        let r_tilde = backend.random_scalar(rng);
        let m_tilde: Vec<B::Scalar> = undisclosed_indexes.iter().map(|_| backend.random_scalar(rng)).collect();

        let u = attribute_commitment(backend, pk, &scalars)? + pk.h_bases[0] * signature.r;
        let init_res = blinded_init(backend, pk, signature, u, rho, rho_tilde, r_tilde, &undisclosed_indexes, &m_tilde)?;
        let challenge = blinded_challenge_calculate(backend, pk, &init_res, total, &disclosed, ph)?;

        if bool::from(challenge.is_zero()) {
            return Err(Error::ArithmeticFailure("challenge == 0".to_owned()));
        }

        let z_rho = rho_tilde + challenge * rho_inv;
        let z_r = r_tilde + challenge * signature.r;
        let z_m = undisclosed_indexes
            .iter()
            .zip(m_tilde)
            .map(|(&j, m_t)| (j, m_t + challenge * scalars[j]))
            .collect();

        log::debug!(
            "blinded disclosure proof over {} attributes, {} disclosed",
            total,
            disclosed_indexes.len()
        );

        Ok(Self {
            Abar: init_res.Abar,
            Bbar: init_res.Bbar,
            challenge,
            z_rho,
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
    /// `Ok(true)` or `Ok(false)`; [`Error`] only for structurally inconsistent proofs.
    ///
    pub fn verify(&self, backend: &B, pk: &BBSplusPublicKey<B>, ph: Option<&[u8]>) -> Result<bool, Error> {
        match core_blinded_verify(backend, pk, self, ph) {
            Ok(()) => Ok(true),
            Err(e) if e.is_rejection() => {
                log::debug!("blinded disclosure proof rejected: {}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn disclosed_attributes(&self) -> &BTreeMap<usize, Vec<u8>> {
        &self.disclosed
    }

    pub fn hidden_indexes(&self) -> Vec<usize> {
        self.z_m.keys().copied().collect()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// `Abar || Bbar || c || z_rho || z_r || I2OSP(total, 8) || disclosed entries || z_m*`
    pub fn to_bytes(&self, backend: &B) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.extend_from_slice(&backend.g1_to_bytes(&self.Abar));
        bytes.extend_from_slice(&backend.g1_to_bytes(&self.Bbar));
        bytes.extend_from_slice(&backend.scalar_to_bytes(&self.challenge));
        bytes.extend_from_slice(&backend.scalar_to_bytes(&self.z_rho));
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
        let Abar = backend.g1_from_bytes(reader.take(B::G1_BYTES)?)?;
        let Bbar = backend.g1_from_bytes(reader.take(B::G1_BYTES)?)?;
        let challenge = backend.scalar_from_bytes(reader.take(B::SCALAR_BYTES)?)?;
        let z_rho = backend.scalar_from_bytes(reader.take(B::SCALAR_BYTES)?)?;
        let z_r = backend.scalar_from_bytes(reader.take(B::SCALAR_BYTES)?)?;
        let total = reader.read_u64()?;
        let disclosed = read_disclosed(&mut reader, total)?;
        let z_m = read_responses(backend, &mut reader, total, &disclosed)?;
        reader.finish()?;

        Ok(Self {
            Abar,
            Bbar,
            challenge,
            z_rho,
            z_r,
            z_m,
            disclosed,
            total,
        })
    }
}

impl<B: GroupBackend> Serialize for BlindedDisclosureProof<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(self.to_bytes(&B::default())))
    }
}

impl<'de, B: GroupBackend> Deserialize<'de> for BlindedDisclosureProof<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(encoded).map_err(de::Error::custom)?;
        Self::from_bytes(&B::default(), &bytes).map_err(de::Error::custom)
    }
}

#[allow(clippy::too_many_arguments)]
fn blinded_init<B: GroupBackend>(
    backend: &B,
    pk: &BBSplusPublicKey<B>,
    signature: &BBSplusSignature<B>,
    u: B::G1,
    rho: B::Scalar,
    rho_tilde: B::Scalar,
    r_tilde: B::Scalar,
    undisclosed_indexes: &[usize],
    m_tilde: &[B::Scalar],
) -> Result<BlindedInitResult<B>, Error> {
    let Abar = signature.a * rho;
    let Bbar = u * rho;

    // T_g1 = ρ̃·B̄ − r̃·h0 − Σ_{j∈H} m̃_j·h_{j+1}
    let bases: Vec<B::G1> = undisclosed_indexes.iter().map(|&j| pk.h_bases[j + 1]).collect();
    let T_g1 = Bbar * rho_tilde - pk.h_bases[0] * r_tilde - backend.msm_g1(&bases, m_tilde)?;
    // T_gt = e(Ā, Y)^r̃
    let T_gt = backend.pair(&Abar, &(pk.Y * r_tilde));

    Ok(BlindedInitResult { Abar, Bbar, T_g1, T_gt })
}

fn blinded_challenge_calculate<B: GroupBackend>(
    backend: &B,
    pk: &BBSplusPublicKey<B>,
    init_res: &BlindedInitResult<B>,
    total: usize,
    disclosed: &BTreeMap<usize, Vec<u8>>,
    ph: Option<&[u8]>,
) -> Result<B::Scalar, Error> {
    let mut c_arr: Vec<u8> = public_key_transcript(backend, pk, total);
    c_arr.extend_from_slice(&backend.g1_to_bytes(&init_res.Abar));
    c_arr.extend_from_slice(&backend.g1_to_bytes(&init_res.Bbar));
    c_arr.extend_from_slice(&backend.g1_to_bytes(&init_res.T_g1));
    c_arr.extend_from_slice(&backend.gt_to_bytes(&init_res.T_gt));
    c_arr.extend_from_slice(&i2osp(total, 8));
    c_arr.extend_from_slice(&disclosed_to_bytes(disclosed));
    c_arr.extend_from_slice(&ph_to_bytes(ph));

    backend.hash_to_scalar(BLINDED_CHALLENGE_DST, &c_arr)
}

fn core_blinded_verify<B: GroupBackend>(
    backend: &B,
    pk: &BBSplusPublicKey<B>,
    proof: &BlindedDisclosureProof<B>,
    ph: Option<&[u8]>,
) -> Result<(), Error> {
    let undisclosed_indexes = check_proof_shape(pk, proof.total, &proof.disclosed, &proof.z_m)?;

    if bool::from(proof.challenge.is_zero()) {
        return Err(Error::ChallengeMismatch);
    }
    if bool::from(proof.Abar.is_identity()) || bool::from(proof.Bbar.is_identity()) {
        return Err(Error::PairingMismatch);
    }

    let c = proof.challenge;

    // P = g1 + Σ_{i∈D} m_i·h_{i+1}
    let mut disclosed_bases = Vec::with_capacity(proof.disclosed.len());
    let mut disclosed_scalars = Vec::with_capacity(proof.disclosed.len());
    for (&i, value) in &proof.disclosed {
        disclosed_bases.push(pk.h_bases[i + 1]);
        disclosed_scalars.push(map_attribute_to_scalar(backend, value)?.value);
    }
    let P = backend.g1_generator() + backend.msm_g1(&disclosed_bases, &disclosed_scalars)?;

    let hidden_bases: Vec<B::G1> = undisclosed_indexes.iter().map(|&j| pk.h_bases[j + 1]).collect();
    let hidden_responses: Vec<B::Scalar> = proof.z_m.values().copied().collect();
    let T_g1 = proof.Bbar * proof.z_rho
        - pk.h_bases[0] * proof.z_r
        - backend.msm_g1(&hidden_bases, &hidden_responses)?
        - P * c;

    let K = backend.pair(&proof.Bbar, &backend.g2_generator()) - backend.pair(&proof.Abar, &pk.X);
    let T_gt = backend.pair(&proof.Abar, &(pk.Y * proof.z_r)) - K * c;

    let init_res = BlindedInitResult {
        Abar: proof.Abar,
        Bbar: proof.Bbar,
        T_g1,
        T_gt,
    };
    let challenge = blinded_challenge_calculate(backend, pk, &init_res, proof.total, &proof.disclosed, ph)?;

    if challenge == c {
        Ok(())
    } else {
        Err(Error::ChallengeMismatch)
    }
}
