// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::biguint_serde;
use crate::error::SlothError::{InvalidInput, InvalidModulus};
use crate::error::{SlothError, SlothResult};
use crate::math::hash_prime;
use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_integer::Integer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Shr;
use std::str::FromStr;

/// A modulus for the sloth delay function: a prime congruent to 3 mod 4, which guarantees that
/// `(p+1)/4` is an integer exponent extracting square roots of quadratic residues. The modulus
/// is validated once at construction, so the delay engine and the verifier never have to check
/// it again. It is immutable and may be shared freely between concurrent evaluations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlothModulus {
    value: BigUint,

    /// Precomputed square-root exponent `(p+1)/4`.
    sqrt_exponent: BigUint,
}

fn validate(value: &BigUint) -> SlothResult<()> {
    if value.mod_floor(&BigUint::from(4u8)) != BigUint::from(3u8)
        || !hash_prime::is_probable_prime(value)
    {
        return Err(InvalidModulus);
    }
    Ok(())
}

impl TryFrom<BigUint> for SlothModulus {
    type Error = SlothError;

    fn try_from(value: BigUint) -> SlothResult<Self> {
        validate(&value)?;
        Ok(Self::new_unchecked(value))
    }
}

impl FromStr for SlothModulus {
    type Err = SlothError;

    /// Parse a modulus from a decimal string and validate it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigUint::from_str(s)
            .map_err(|_| InvalidInput)
            .and_then(Self::try_from)
    }
}

impl SlothModulus {
    fn new_unchecked(value: BigUint) -> Self {
        let sqrt_exponent = (&value + 1u8).shr(2);
        Self {
            value,
            sqrt_exponent,
        }
    }

    /// Compute a valid modulus (a prime congruent to 3 mod 4) based on the given seed. The
    /// size_in_bits must be a positive multiple of 8.
    pub fn from_seed(seed: &[u8], size_in_bits: usize) -> SlothResult<Self> {
        if size_in_bits == 0 || size_in_bits % 8 != 0 {
            return Err(InvalidInput);
        }
        // Set the two lowest bits so all candidates are 3 mod 4, and the top bit to fix the
        // bit length.
        Self::try_from(hash_prime::hash_prime(
            seed,
            size_in_bits / 8,
            &[0, 1, size_in_bits - 1],
        ))
    }

    /// Return the number of bits needed to represent this modulus.
    pub fn bits(&self) -> u64 {
        self.value.bits()
    }

    /// The width in bytes of a serialized field element, `ceil(bits / 8)`.
    pub fn byte_length(&self) -> usize {
        ((self.value.bits() + 7) / 8) as usize
    }

    /// Borrow a reference to the underlying big integer.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Reduce the given value modulo this modulus.
    pub fn reduce(&self, value: &BigUint) -> BigUint {
        value.mod_floor(&self.value)
    }

    /// One slow step of the delay chain: a square root of `value`, computed as
    /// `value^((p+1)/4) mod p`. Assumes `value < p`.
    pub fn sqrt_step(&self, value: &BigUint) -> BigUint {
        value.modpow(&self.sqrt_exponent, &self.value)
    }

    /// One fast step of the verifier: `value^2 mod p`.
    pub fn square(&self, value: &BigUint) -> BigUint {
        (value * value).mod_floor(&self.value)
    }

    /// Serialize a field element as a fixed-width big-endian byte string of [Self::byte_length]
    /// bytes. Fails with `InvalidInput` if the element is not in `[0, p)`.
    pub fn serialize_element(&self, value: &BigUint) -> SlothResult<Vec<u8>> {
        if value >= &self.value {
            return Err(InvalidInput);
        }
        let bytes = value.to_bytes_be();
        let mut padded = vec![0u8; self.byte_length()];
        let offset = padded.len() - bytes.len();
        padded[offset..].copy_from_slice(&bytes);
        Ok(padded)
    }

    /// Parse a field element from a fixed-width big-endian byte string as produced by
    /// [Self::serialize_element].
    pub fn deserialize_element(&self, bytes: &[u8]) -> SlothResult<BigUint> {
        if bytes.len() != self.byte_length() {
            return Err(InvalidInput);
        }
        let value = BigUint::from_bytes_be(bytes);
        if value >= self.value {
            return Err(InvalidInput);
        }
        Ok(value)
    }
}

impl Serialize for SlothModulus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        biguint_serde::serialize(&self.value, serializer)
    }
}

impl<'de> Deserialize<'de> for SlothModulus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = biguint_serde::deserialize(deserializer)?;
        validate(&value).map_err(serde::de::Error::custom)?;
        Ok(Self::new_unchecked(value))
    }
}

lazy_static! {
    /// The 32-bit prime 10^9 + 7, handy for tests and demos.
    pub static ref MODULUS_32: SlothModulus =
        SlothModulus::try_from(BigUint::from(1000000007u64)).unwrap();

    /// A 128-bit prime congruent to 3 mod 4.
    pub static ref MODULUS_128: SlothModulus =
        SlothModulus::from_str("73237431696005972674723595250817150843").unwrap();

    /// A 256-bit prime congruent to 3 mod 4, the default beacon modulus.
    pub static ref MODULUS_256: SlothModulus = SlothModulus::from_str(
        "60464814417085833675395020742168312237934553084050601624605007846337253615407"
    )
    .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use std::str::FromStr;

    #[test]
    fn test_validation() {
        // 11 = 3 mod 4 and prime
        assert!(SlothModulus::try_from(BigUint::from(11u64)).is_ok());

        // 13 is prime but 1 mod 4
        assert_eq!(
            SlothModulus::try_from(BigUint::from(13u64)).unwrap_err(),
            SlothError::InvalidModulus
        );

        // 15 = 3 mod 4 but composite
        assert_eq!(
            SlothModulus::try_from(BigUint::from(15u64)).unwrap_err(),
            SlothError::InvalidModulus
        );

        assert_eq!(
            SlothModulus::try_from(BigUint::from(0u64)).unwrap_err(),
            SlothError::InvalidModulus
        );
    }

    #[test]
    fn test_from_str() {
        let modulus = SlothModulus::from_str("1000000007").unwrap();
        assert_eq!(modulus, *MODULUS_32);
        assert_eq!(modulus.bits(), 30);
        assert_eq!(modulus.byte_length(), 4);

        assert_eq!(
            SlothModulus::from_str("not a number").unwrap_err(),
            SlothError::InvalidInput
        );
        assert_eq!(
            SlothModulus::from_str("1000000005").unwrap_err(),
            SlothError::InvalidModulus
        );
    }

    #[test]
    fn test_sqrt_exponent() {
        // (p+1)/4 = 3 for p = 11, so the root of the residue 5 is 5^3 = 125 = 4 mod 11.
        let modulus = SlothModulus::try_from(BigUint::from(11u64)).unwrap();
        let root = modulus.sqrt_step(&BigUint::from(5u64));
        assert_eq!(modulus.square(&root), BigUint::from(5u64));
    }

    #[test]
    fn test_from_seed() {
        let modulus = SlothModulus::from_seed(&[0u8; 32], 256).unwrap();
        assert_eq!(modulus.bits(), 256);
        assert_eq!(
            modulus.value(),
            &BigUint::from_str(
                "61653052074838668148430856467290105508908269717653440085074308839515447078859"
            )
            .unwrap()
        );

        // The size must be a positive multiple of 8.
        assert_eq!(
            SlothModulus::from_seed(&[0u8; 32], 0).unwrap_err(),
            SlothError::InvalidInput
        );
        assert_eq!(
            SlothModulus::from_seed(&[0u8; 32], 123).unwrap_err(),
            SlothError::InvalidInput
        );
    }

    #[test]
    fn test_element_serialization() {
        let bytes = MODULUS_32.serialize_element(&BigUint::from(5u64)).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 5]);
        assert_eq!(
            MODULUS_32.deserialize_element(&bytes).unwrap(),
            BigUint::from(5u64)
        );

        // Elements must be fully reduced and fixed-width.
        assert_eq!(
            MODULUS_32
                .serialize_element(&BigUint::from(1000000007u64))
                .unwrap_err(),
            SlothError::InvalidInput
        );
        assert_eq!(
            MODULUS_32.deserialize_element(&[0, 0, 5]).unwrap_err(),
            SlothError::InvalidInput
        );
        assert_eq!(
            MODULUS_32
                .deserialize_element(&[0x3b, 0x9a, 0xca, 0x07])
                .unwrap_err(),
            SlothError::InvalidInput
        );
    }

    #[test]
    fn test_serde() {
        let serialized = bcs::to_bytes(&*MODULUS_32).unwrap();
        let deserialized: SlothModulus = bcs::from_bytes(&serialized).unwrap();
        assert_eq!(deserialized, *MODULUS_32);

        // An invalid modulus is rejected on deserialization.
        let serialized = bcs::to_bytes(&BigUint::from(15u64).to_bytes_be()).unwrap();
        assert!(bcs::from_bytes::<SlothModulus>(&serialized).is_err());
    }
}
