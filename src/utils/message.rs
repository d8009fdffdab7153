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

use crate::{backend::GroupBackend, bbsplus::ciphersuites::ATTRIBUTE_DST, errors::Error};

/// An attribute mapped into `Zp`. The position in the attribute vector selects its basis point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeScalar<S> {
    pub value: S,
}

impl<S: Copy> AttributeScalar<S> {
    pub fn get_value(&self) -> S {
        self.value
    }
}

/// Maps one attribute to a nonzero scalar with the attribute domain tag.
pub fn map_attribute_to_scalar<B: GroupBackend>(
    backend: &B,
    attribute: &[u8],
) -> Result<AttributeScalar<B::Scalar>, Error> {
    Ok(AttributeScalar {
        value: backend.hash_to_scalar(ATTRIBUTE_DST, attribute)?,
    })
}

/// Maps an ordered attribute vector to scalars, preserving order.
pub fn attributes_to_scalars<B, T>(backend: &B, attributes: &[T]) -> Result<Vec<B::Scalar>, Error>
where
    B: GroupBackend,
    T: AsRef<[u8]>,
{
    attributes
        .iter()
        .map(|a| map_attribute_to_scalar(backend, a.as_ref()).map(|m| m.value))
        .collect()
}

#[cfg(all(test, feature = "bls12_381"))]
mod tests {
    use super::*;
    use crate::backend::bls12_381::Bls12381Sha256Backend;
    use ff::Field;

    #[test]
    fn encoding_is_ordered_and_deterministic() {
        let backend = Bls12381Sha256Backend::new();
        let scalars = attributes_to_scalars(&backend, &["alice", "30"]).unwrap();
        assert_eq!(scalars.len(), 2);
        assert_eq!(scalars[0], map_attribute_to_scalar(&backend, b"alice").unwrap().get_value());
        assert_ne!(scalars[0], scalars[1]);
        assert!(!bool::from(scalars[1].is_zero()));

        let empty: [&str; 0] = [];
        assert!(attributes_to_scalars(&backend, &empty).unwrap().is_empty());
    }

    #[test]
    fn attribute_tag_separates_from_plain_hash() {
        let backend = Bls12381Sha256Backend::new();
        let attr = map_attribute_to_scalar(&backend, b"gold").unwrap().get_value();
        assert_ne!(attr, backend.hash_to_scalar(b"OTHER_", b"gold").unwrap());
    }
}
