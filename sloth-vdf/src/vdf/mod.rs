// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module contains an implementation of a verifiable delay function (VDF) using the sloth
//! construction over a prime field.

use crate::error::SlothResult;

pub mod sloth;

/// This represents a Verifiable Delay Function (VDF) construction.
///
/// In contrast to proof-carrying constructions (Wesolowski, Pietrzak), the sloth verifier
/// recomputes the chain in the cheap forward direction, so there is no separate proof type:
/// the output is its own certificate.
pub trait VDF {
    /// The type of the input to the VDF.
    type InputType;

    /// The type of the output from the VDF.
    type OutputType;

    /// Evaluate this VDF and return the output.
    fn evaluate(&self, input: &Self::InputType) -> SlothResult<Self::OutputType>;

    /// Verify that `output` is the correct evaluation of this VDF on `input`.
    fn verify(&self, input: &Self::InputType, output: &Self::OutputType) -> SlothResult<()>;
}

#[cfg(test)]
mod tests {
    use crate::modulus::MODULUS_256;
    use crate::vdf::sloth::SlothVDF;
    use crate::vdf::VDF;
    use num_bigint::BigUint;
    use sha2::{Digest, Sha256};

    #[test]
    fn vdf_e2e_test() {
        // This test runs an e2e test of a sloth-based randomness beacon with the default 256 bit
        // modulus. Number of iterations for the VDF
        let iterations = 100;
        let vdf = SlothVDF::new(MODULUS_256.clone(), iterations);

        // Add some randomness
        let mut combined_randomness = Vec::new();
        let some_randomness = b"some randomness";
        combined_randomness =
            Sha256::digest([&combined_randomness, some_randomness.as_ref()].concat()).to_vec();
        let more_randomness = b"more randomness";
        combined_randomness =
            Sha256::digest([&combined_randomness, more_randomness.as_ref()].concat()).to_vec();
        assert_eq!(
            combined_randomness,
            hex::decode("2ef29e01809053dcfc89e7acad77e13c2bf03b5a9a0bbfea555a1423f1f1ae23")
                .unwrap()
        );

        // Compute the VDF input from the combined randomness
        let input = BigUint::from_bytes_be(&combined_randomness);

        // Compute the output of the VDF
        let output = vdf.evaluate(&input).unwrap();
        let output_bytes = MODULUS_256.serialize_element(&output).unwrap();
        assert_eq!(
            output_bytes,
            hex::decode("3f3fb046ad5a9dd794da7ec518c0500ef25b9e7be5294a2e23695c592c8de483")
                .unwrap()
        );

        // Verify the output
        assert!(vdf.verify(&input, &output).is_ok());

        // Derive randomness from the output
        let randomness = Sha256::digest(&output_bytes);
        let expected =
            hex::decode("63721d93c6497b1724acb21080c8068ed240949d79a129b1081b5536efb0b29e")
                .unwrap();
        assert_eq!(randomness.to_vec(), expected);
    }
}
