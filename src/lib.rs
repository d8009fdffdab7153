#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

//! BBS+ multi-attribute signatures with Sigma-protocol selective disclosure.
//!
//! An issuer signs an ordered attribute vector with a dual-key BBS+ signature; a holder later
//! proves possession of the signature while revealing only a chosen subset of attributes.
//! All protocol code is generic over a [`backend::GroupBackend`]; the `bls12_381` feature
//! (on by default) provides the BLS12-381 implementation.

pub mod errors;
pub mod backend;
pub mod utils;
pub mod keys;
pub mod bbsplus;
