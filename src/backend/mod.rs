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

//! Pairing-group backends.
//!
//! The protocol code in [`crate::bbsplus`] is written once against [`GroupBackend`]; a curve is
//! plugged in by implementing the trait. Group addition, subtraction, negation and scalar
//! multiplication come from the [`group::Group`] bounds on the associated types, so every
//! operation returns a fresh value.

use core::fmt::Debug;
use ff::PrimeField;
use group::Group;
use rand::{CryptoRng, RngCore};

use crate::errors::Error;

#[cfg(feature = "bls12_381")]
/// BLS12-381 backend
pub mod bls12_381;
#[cfg(feature = "insecure_basis")]
/// Test-only basis derivation with known discrete logarithms
pub mod insecure;

pub trait GroupBackend: Clone + Copy + Debug + Default + Send + Sync + 'static {
    type Scalar: PrimeField;
    type G1: Group<Scalar = Self::Scalar>;
    type G2: Group<Scalar = Self::Scalar>;
    type Gt: Group<Scalar = Self::Scalar>;

    const SCALAR_BYTES: usize;
    const G1_BYTES: usize;
    const G2_BYTES: usize;

    /// Uniform nonzero scalar.
    fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Self::Scalar;

    /// Deterministic, domain separated map into `Zp \ {0}`.
    fn hash_to_scalar(&self, dst: &[u8], msg: &[u8]) -> Result<Self::Scalar, Error>;

    /// Hash to G1 with no known discrete logarithm relative to any other output.
    fn hash_to_g1(&self, dst: &[u8], label: &[u8]) -> Result<Self::G1, Error>;

    fn pair(&self, p: &Self::G1, q: &Self::G2) -> Self::Gt;

    fn g1_generator(&self) -> Self::G1 {
        Self::G1::generator()
    }

    fn g2_generator(&self) -> Self::G2 {
        Self::G2::generator()
    }

    /// `Σ scalars[i]·bases[i]`
    fn msm_g1(&self, bases: &[Self::G1], scalars: &[Self::Scalar]) -> Result<Self::G1, Error> {
        if bases.len() != scalars.len() {
            return Err(Error::InvalidArgument(format!(
                "msm over {} bases and {} scalars",
                bases.len(),
                scalars.len()
            )));
        }
        Ok(bases
            .iter()
            .zip(scalars)
            .fold(Self::G1::identity(), |acc, (b, s)| acc + *b * *s))
    }

    /// `Π e(P_i, Q_i) == 1_GT`
    fn pairing_product_is_identity(&self, terms: &[(Self::G1, Self::G2)]) -> bool {
        let product = terms
            .iter()
            .fold(Self::Gt::identity(), |acc, (p, q)| acc + self.pair(p, q));
        product.is_identity().into()
    }

    fn scalar_to_bytes(&self, s: &Self::Scalar) -> Vec<u8>;
    fn scalar_from_bytes(&self, bytes: &[u8]) -> Result<Self::Scalar, Error>;
    fn g1_to_bytes(&self, p: &Self::G1) -> Vec<u8>;
    fn g1_from_bytes(&self, bytes: &[u8]) -> Result<Self::G1, Error>;
    fn g2_to_bytes(&self, q: &Self::G2) -> Vec<u8>;
    fn g2_from_bytes(&self, bytes: &[u8]) -> Result<Self::G2, Error>;
    /// Canonical GT bytes, only ever fed to transcript hashes.
    fn gt_to_bytes(&self, t: &Self::Gt) -> Vec<u8>;
}
