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

//! Dual-key BBS+ signatures over ordered attribute vectors.
//!
//! An issuer holding `(x, y)` signs attributes `m_1..m_L` as `(A, r)` with
//! `A = (g1 · h0^r · Π h_i^{m_i})^{1/(x + y·r)}`. A holder proves possession of `(A, r)` while
//! disclosing only some attributes, either with [`proof::DisclosureProof`], which reveals `A`,
//! or with [`blinded::BlindedDisclosureProof`], which randomises it per presentation.
//! - **Issuance**: [`signature::BBSplusSignature::sign`], plus issuer-side
//!   [`signature::BBSplusSignature::update_attributes`] and
//!   [`signature::BBSplusSignature::re_randomise`].
//! - **Presentation**: the proof is made non-interactive with Fiat-Shamir; an optional
//!   presentation header (nonce, audience) is bound into the challenge.

/// Module for blinded (unlinkable) disclosure proofs
pub mod blinded;
/// Module for ciphersuites
pub mod ciphersuites;
/// Module for generators
pub mod generators;
/// Module for keys
pub mod keys;
/// Module for disclosure proofs
pub mod proof;
/// Module for signatures
pub mod signature;
