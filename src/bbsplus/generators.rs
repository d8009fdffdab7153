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

use std::collections::BTreeSet;

use super::ciphersuites::{BASIS_DST, H0_LABEL, H_LABEL_PREFIX};
use crate::{backend::GroupBackend, errors::Error};

/// The basis vector `[h0, h1, …, hL]`.
///
/// `h0` carries the blinding scalar `r`, attribute `i` (0-based) is bound to `values[i + 1]`.
/// Each point is an independent hash-to-curve output of its own label.
#[derive(Clone, Debug)]
pub struct Generators<B: GroupBackend> {
    pub values: Vec<B::G1>,
}

impl<B: GroupBackend> PartialEq for Generators<B> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<B: GroupBackend> Eq for Generators<B> {}

impl<B: GroupBackend> Generators<B> {
    /// # Description
    /// Derives `max_attributes + 1` basis points: `h0` from `BBS_PLUS_H0` and `h_i` from
    /// `BBS_PLUS_H{i}` for `i = 1..=max_attributes`.
    ///
    /// # Inputs:
    /// * `backend` (REQUIRED), the group backend providing hash-to-G1
    /// * `max_attributes` (REQUIRED), the largest attribute vector the key will sign
    ///
    /// # Output:
    /// a [`Generators`] or [`Error`].
    ///
    pub fn create(backend: &B, max_attributes: usize) -> Result<Self, Error> {
        let count = max_attributes
            .checked_add(1)
            .ok_or_else(|| Error::InvalidArgument("max_attributes too large".to_owned()))?;
        let values = (0..count)
            .map(|index| backend.hash_to_g1(BASIS_DST, &Self::label(index)))
            .collect::<Result<Vec<B::G1>, Error>>()?;

        let distinct: BTreeSet<Vec<u8>> = values.iter().map(|h| backend.g1_to_bytes(h)).collect();
        if distinct.len() != values.len() {
            return Err(Error::BackendError("basis points are not pairwise distinct".to_owned()));
        }

        log::debug!("derived {} basis points", values.len());
        Ok(Self { values })
    }

    pub fn label(index: usize) -> Vec<u8> {
        if index == 0 {
            H0_LABEL.to_vec()
        } else {
            format!("{}{}", H_LABEL_PREFIX, index).into_bytes()
        }
    }

    pub fn h0(&self) -> B::G1 {
        self.values[0]
    }

    /// Basis of the attribute at 0-based position `index`.
    pub fn attribute_base(&self, index: usize) -> Option<B::G1> {
        self.values.get(index + 1).copied()
    }

    pub fn max_attributes(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// Re-derives every basis of `values` and reports whether they all match.
    pub fn check(backend: &B, values: &[B::G1]) -> Result<bool, Error> {
        if values.is_empty() {
            return Ok(false);
        }
        let expected = Self::create(backend, values.len() - 1)?;
        Ok(expected.values == values)
    }
}

#[cfg(all(test, feature = "bls12_381"))]
mod tests {
    use super::*;
    use crate::backend::bls12_381::{Bls12381Sha256Backend, Bls12381Shake256Backend};

    #[test]
    fn labels() {
        assert_eq!(Generators::<Bls12381Sha256Backend>::label(0), b"BBS_PLUS_H0".to_vec());
        assert_eq!(Generators::<Bls12381Sha256Backend>::label(12), b"BBS_PLUS_H12".to_vec());
    }

    #[test]
    fn creates_one_more_than_max_attributes() {
        let backend = Bls12381Sha256Backend::new();
        let generators = Generators::create(&backend, 5).unwrap();
        assert_eq!(generators.values.len(), 6);
        assert_eq!(generators.max_attributes(), 5);
        assert_eq!(generators.attribute_base(0), Some(generators.values[1]));
        assert_eq!(generators.attribute_base(5), None);

        let zero = Generators::create(&backend, 0).unwrap();
        assert_eq!(zero.values.len(), 1);
        assert_eq!(zero.h0(), generators.h0());
    }

    #[test]
    fn large_basis_is_pairwise_distinct() {
        let backend = Bls12381Sha256Backend::new();
        let generators = Generators::create(&backend, 128).unwrap();
        assert_eq!(generators.values.len(), 129);
        assert_eq!(generators.attribute_base(127), Some(generators.values[128]));
        let distinct: BTreeSet<Vec<u8>> = generators.values.iter().map(|h| backend.g1_to_bytes(h)).collect();
        assert_eq!(distinct.len(), 129);
    }

    #[test]
    fn derivation_is_stable_and_suite_specific() {
        let sha = Bls12381Sha256Backend::new();
        let shake = Bls12381Shake256Backend::new();
        let a = Generators::create(&sha, 3).unwrap();
        assert_eq!(a, Generators::create(&sha, 3).unwrap());
        assert_ne!(a.h0(), Generators::create(&shake, 3).unwrap().h0());
        assert!(Generators::check(&sha, &a.values).unwrap());

        let mut swapped = a.values.clone();
        swapped.swap(1, 2);
        assert!(!Generators::check(&sha, &swapped).unwrap());
        assert!(!Generators::check(&sha, &[]).unwrap());
    }
}
