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

use core::marker::PhantomData;

use bls12_381_plus::{
    multi_miller_loop, pairing, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt,
    Scalar,
};
use elliptic_curve::{
    group::Curve,
    hash2curve::{ExpandMsg, Expander},
};
use ff::Field;
use group::Group;
use rand::{CryptoRng, RngCore};

use super::GroupBackend;
use crate::{
    bbsplus::ciphersuites::{BbsCiphersuite, Bls12381Sha256, Bls12381Shake256},
    errors::Error,
};

/// BLS12-381 with RFC 9380 hash-to-curve; `CS` selects the `expand_message` variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bls12381Backend<CS: BbsCiphersuite> {
    _cs: PhantomData<CS>,
}

pub type Bls12381Sha256Backend = Bls12381Backend<Bls12381Sha256>;
pub type Bls12381Shake256Backend = Bls12381Backend<Bls12381Shake256>;

impl<CS: BbsCiphersuite> Bls12381Backend<CS> {
    pub fn new() -> Self {
        Self { _cs: PhantomData }
    }

    fn suite_dst(dst: &[u8]) -> Vec<u8> {
        [CS::ID, dst].concat()
    }
}

impl<CS> GroupBackend for Bls12381Backend<CS>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    type Scalar = Scalar;
    type G1 = G1Projective;
    type G2 = G2Projective;
    type Gt = Gt;

    const SCALAR_BYTES: usize = 32;
    const G1_BYTES: usize = 48;
    const G2_BYTES: usize = 96;

    fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Scalar {
        let mut buf = [0u8; 48];
        loop {
            rng.fill_bytes(&mut buf);
            let scalar = Scalar::from_okm(&buf);
            if !bool::from(scalar.is_zero()) {
                return scalar;
            }
        }
    }

    fn hash_to_scalar(&self, dst: &[u8], msg: &[u8]) -> Result<Scalar, Error> {
        let dst = Self::suite_dst(dst);
        let mut uniform_bytes = vec![0u8; CS::EXPAND_LEN];

        for counter in 0..=u8::MAX {
            let msg_prime = [msg, &[counter]].concat();
            CS::Expander::expand_message(&[msg_prime.as_slice()], &[dst.as_slice()], CS::EXPAND_LEN)
                .map_err(|_| Error::HashToScalarError)?
                .fill_bytes(&mut uniform_bytes);
            let okm: &[u8; 48] = uniform_bytes
                .as_slice()
                .try_into()
                .map_err(|_| Error::HashToScalarError)?;
            let scalar = Scalar::from_okm(okm);
            if !bool::from(scalar.is_zero()) {
                return Ok(scalar);
            }
        }

        Err(Error::HashToScalarError)
    }

    fn hash_to_g1(&self, dst: &[u8], label: &[u8]) -> Result<G1Projective, Error> {
        let dst = Self::suite_dst(dst);
        let point = G1Projective::hash::<CS::Expander>(label, &dst);
        if bool::from(point.is_identity()) {
            return Err(Error::BackendError("hash to G1 produced the identity".to_owned()));
        }
        Ok(point)
    }

    fn pair(&self, p: &G1Projective, q: &G2Projective) -> Gt {
        pairing(&p.to_affine(), &q.to_affine())
    }

    fn pairing_product_is_identity(&self, terms: &[(G1Projective, G2Projective)]) -> bool {
        let prepared: Vec<(G1Affine, G2Prepared)> = terms
            .iter()
            .map(|(p, q)| (p.to_affine(), G2Prepared::from(q.to_affine())))
            .collect();
        let refs: Vec<(&G1Affine, &G2Prepared)> = prepared.iter().map(|(p, q)| (p, q)).collect();

        multi_miller_loop(&refs).final_exponentiation().is_identity().into()
    }

    fn scalar_to_bytes(&self, s: &Scalar) -> Vec<u8> {
        s.to_be_bytes().to_vec()
    }

    fn scalar_from_bytes(&self, bytes: &[u8]) -> Result<Scalar, Error> {
        let bytes = <[u8; 32]>::try_from(bytes)
            .map_err(|_| Error::BackendError(format!("scalar must be 32 bytes, got {}", bytes.len())))?;
        Option::<Scalar>::from(Scalar::from_be_bytes(&bytes))
            .ok_or_else(|| Error::BackendError("non canonical scalar".to_owned()))
    }

    fn g1_to_bytes(&self, p: &G1Projective) -> Vec<u8> {
        p.to_affine().to_compressed().to_vec()
    }

    fn g1_from_bytes(&self, bytes: &[u8]) -> Result<G1Projective, Error> {
        let bytes = <[u8; 48]>::try_from(bytes)
            .map_err(|_| Error::BackendError(format!("G1 point must be 48 bytes, got {}", bytes.len())))?;
        Option::<G1Affine>::from(G1Affine::from_compressed(&bytes))
            .map(G1Projective::from)
            .ok_or_else(|| Error::BackendError("invalid G1 encoding".to_owned()))
    }

    fn g2_to_bytes(&self, q: &G2Projective) -> Vec<u8> {
        q.to_affine().to_compressed().to_vec()
    }

    fn g2_from_bytes(&self, bytes: &[u8]) -> Result<G2Projective, Error> {
        let bytes = <[u8; 96]>::try_from(bytes)
            .map_err(|_| Error::BackendError(format!("G2 point must be 96 bytes, got {}", bytes.len())))?;
        Option::<G2Affine>::from(G2Affine::from_compressed(&bytes))
            .map(G2Projective::from)
            .ok_or_else(|| Error::BackendError("invalid G2 encoding".to_owned()))
    }

    fn gt_to_bytes(&self, t: &Gt) -> Vec<u8> {
        t.to_bytes().to_vec()
    }
}
