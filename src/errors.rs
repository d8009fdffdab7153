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

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Malformed input shape: too many attributes, disclosed index out of range,
    /// duplicate disclosed indexes, inconsistent proof index sets.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// `x + y·r ≡ 0 (mod p)` could not be avoided.
    #[error("Degenerate scalar combination: {0}")]
    ArithmeticFailure(String),
    /// Recomputed Fiat-Shamir challenge differs from the one in the proof.
    #[error("Challenge mismatch")]
    ChallengeMismatch,
    /// Pairing verification equation does not hold.
    #[error("Pairing mismatch")]
    PairingMismatch,
    /// Malformed or off-curve encoding rejected by the group backend.
    #[error("Backend error: {0}")]
    BackendError(String),
    #[error("Error during hash to scalar computation")]
    HashToScalarError,
    #[error("Error during keypair generation: {0}")]
    KeyGenError(String),
    #[error("Error during deserialization: {0}")]
    DeserializationError(String),
}

impl Error {
    /// `true` for the outcomes a verifier reports as `false` rather than as an error.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::ChallengeMismatch | Error::PairingMismatch)
    }
}
