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

//! **Insecure, test only.** Derives basis points as `g1 · hash_to_scalar(label)`.
//!
//! Anyone who knows the label knows the discrete logarithm of every basis point, which breaks
//! knowledge soundness of the disclosure proofs. It exists to reproduce backends that take this
//! shortcut and is only compiled with the `insecure_basis` feature.

use rand::{CryptoRng, RngCore};

use super::GroupBackend;
use crate::errors::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScalarMulBasis<B: GroupBackend>(pub B);

impl<B: GroupBackend> GroupBackend for ScalarMulBasis<B> {
    type Scalar = B::Scalar;
    type G1 = B::G1;
    type G2 = B::G2;
    type Gt = B::Gt;

    const SCALAR_BYTES: usize = B::SCALAR_BYTES;
    const G1_BYTES: usize = B::G1_BYTES;
    const G2_BYTES: usize = B::G2_BYTES;

    fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Self::Scalar {
        self.0.random_scalar(rng)
    }

    fn hash_to_scalar(&self, dst: &[u8], msg: &[u8]) -> Result<Self::Scalar, Error> {
        self.0.hash_to_scalar(dst, msg)
    }

    fn hash_to_g1(&self, dst: &[u8], label: &[u8]) -> Result<Self::G1, Error> {
        log::warn!(
            "deriving basis {:?} with a known discrete logarithm (insecure_basis)",
            String::from_utf8_lossy(label)
        );
        let k = self.0.hash_to_scalar(dst, label)?;
        Ok(self.0.g1_generator() * k)
    }

    fn pair(&self, p: &Self::G1, q: &Self::G2) -> Self::Gt {
        self.0.pair(p, q)
    }

    fn msm_g1(&self, bases: &[Self::G1], scalars: &[Self::Scalar]) -> Result<Self::G1, Error> {
        self.0.msm_g1(bases, scalars)
    }

    fn pairing_product_is_identity(&self, terms: &[(Self::G1, Self::G2)]) -> bool {
        self.0.pairing_product_is_identity(terms)
    }

    fn scalar_to_bytes(&self, s: &Self::Scalar) -> Vec<u8> {
        self.0.scalar_to_bytes(s)
    }

    fn scalar_from_bytes(&self, bytes: &[u8]) -> Result<Self::Scalar, Error> {
        self.0.scalar_from_bytes(bytes)
    }

    fn g1_to_bytes(&self, p: &Self::G1) -> Vec<u8> {
        self.0.g1_to_bytes(p)
    }

    fn g1_from_bytes(&self, bytes: &[u8]) -> Result<Self::G1, Error> {
        self.0.g1_from_bytes(bytes)
    }

    fn g2_to_bytes(&self, q: &Self::G2) -> Vec<u8> {
        self.0.g2_to_bytes(q)
    }

    fn g2_from_bytes(&self, bytes: &[u8]) -> Result<Self::G2, Error> {
        self.0.g2_from_bytes(bytes)
    }

    fn gt_to_bytes(&self, t: &Self::Gt) -> Vec<u8> {
        self.0.gt_to_bytes(t)
    }
}
