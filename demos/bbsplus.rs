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

#[cfg(feature = "bls12_381")]
mod bbsplus_example {
    use std::collections::BTreeMap;

    use rand::Rng;
    use bbsplus_sd::{
        backend::GroupBackend,
        bbsplus::{blinded::BlindedDisclosureProof, proof::DisclosureProof, signature::BBSplusSignature},
        errors::Error,
        keys::pair::KeyPair,
    };

    pub(crate) fn bbsplus_main<B: GroupBackend>() -> Result<(), Error> {
        const ATTRIBUTES: [&str; 5] = ["alice", "30", "US", "gold", "2024"];

        log::info!("Attributes: {:?}", ATTRIBUTES);

        let backend = B::default();
        let mut rng = rand::thread_rng();

        log::info!("Keypair Generation");
        let issuer_keypair = KeyPair::generate(&backend, ATTRIBUTES.len(), &mut rng)?;
        let issuer_pk = issuer_keypair.public_key();
        log::info!("PK: {}", issuer_pk.encode(&backend));
        log::info!("Bases derived by hash-to-curve: {}", issuer_pk.check_bases(&backend)?);

        log::info!("Signature Computation...");
        let signature = BBSplusSignature::sign(&backend, &issuer_keypair, &ATTRIBUTES, &mut rng)?;
        log::info!("Signature: {}", hex::encode(signature.to_bytes(&backend)));

        assert!(
            signature.verify(&backend, issuer_pk, &ATTRIBUTES)?,
            "Signature verification FAILED!"
        );
        log::info!("Signature is VALID");

        //Holder receives nonce from Verifier
        let nonce_verifier: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
        log::info!("Nonce: {}", hex::encode(&nonce_verifier));

        let disclosed_indexes = [1usize, 2usize];

        log::info!("Selective Disclosure Proof Generation...");
        let proof = DisclosureProof::prove(
            &backend,
            issuer_pk,
            &signature,
            &ATTRIBUTES,
            &disclosed_indexes,
            Some(&nonce_verifier),
            &mut rng,
        )?;
        log::info!("Disclosed: {:?}", proof.disclosed_attributes());

        assert!(
            proof.verify(&backend, issuer_pk, Some(&nonce_verifier))?,
            "Selective Disclosure Proof Verification Failed!"
        );
        log::info!("Selective Disclosure Proof is VALID!");

        let mut tampered = proof.clone();
        tampered.disclosed.insert(1, b"31".to_vec());
        log::info!(
            "Tampered proof (age 31) accepted: {}",
            tampered.verify(&backend, issuer_pk, Some(&nonce_verifier))?
        );

        log::info!("Blinded Disclosure Proof Generation...");
        let blinded = BlindedDisclosureProof::prove(
            &backend,
            issuer_pk,
            &signature,
            &ATTRIBUTES,
            &disclosed_indexes,
            Some(&nonce_verifier),
            &mut rng,
        )?;
        assert!(
            blinded.verify(&backend, issuer_pk, Some(&nonce_verifier))?,
            "Blinded Disclosure Proof Verification Failed!"
        );
        log::info!("Blinded Disclosure Proof is VALID!");

        log::info!("Issuer updates attribute 3...");
        let updates = BTreeMap::from([(3usize, "platinum")]);
        let updated = signature.update_attributes(&backend, &issuer_keypair, &ATTRIBUTES, &updates)?;
        let new_attributes = ["alice", "30", "US", "platinum", "2024"];
        assert!(
            updated.verify(&backend, issuer_pk, &new_attributes)?,
            "Updated Signature verification FAILED!"
        );
        log::info!("Updated Signature is VALID");

        Ok(())
    }
}

#[cfg(feature = "bls12_381")]
fn main() {
    use crate::bbsplus_example::bbsplus_main;
    use bbsplus_sd::backend::bls12_381::{Bls12381Sha256Backend, Bls12381Shake256Backend};
    use std::env;

    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        println!(
            "Usage: {} <cipher_suite>
                Ciphersuites:
                    - BLS12-381-SHA-256
                    - BLS12-381-SHAKE-256",
            args[0]
        );
        return;
    }

    let cipher_suite = &args[1];

    let result = match cipher_suite.as_str() {
        "BLS12-381-SHA-256" => {
            log::info!("Ciphersuite: BLS12-381-SHA-256");
            bbsplus_main::<Bls12381Sha256Backend>()
        }
        "BLS12-381-SHAKE-256" => {
            log::info!("Ciphersuite: BLS12-381-SHAKE-256");
            bbsplus_main::<Bls12381Shake256Backend>()
        }
        _ => {
            println!("Unknown cipher suite: {}", cipher_suite);
            return;
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
    }
}

#[cfg(not(feature = "bls12_381"))]
fn main() {}
