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

use crate::{
    backend::GroupBackend,
    bbsplus::keys::{BBSplusPublicKey, BBSplusSecretKey},
};

/// Issuer key pair. Created once, then shared read-only by every signing and proving call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair<B: GroupBackend> {
    pub(crate) public: BBSplusPublicKey<B>,
    pub(crate) private: BBSplusSecretKey<B>,
}

impl<B: GroupBackend> KeyPair<B> {
    pub fn public_key(&self) -> &BBSplusPublicKey<B> {
        &self.public
    }

    pub fn private_key(&self) -> &BBSplusSecretKey<B> {
        &self.private
    }

    /// Returns the couple `(sk, pk)`.
    pub fn into_parts(self) -> (BBSplusSecretKey<B>, BBSplusPublicKey<B>) {
        (self.private, self.public)
    }
}
