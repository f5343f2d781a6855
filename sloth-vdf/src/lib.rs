// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A verifiable delay function (VDF) based on iterated modular square roots, also known as the
//! "sloth" construction (Lenstra & Wesolowski, "A random zoo: sloth, unicorn, and trx",
//! https://eprint.iacr.org/2015/366).
//!
//! Evaluation applies `t` sequential square-root extractions modulo a prime `p` congruent to
//! 3 mod 4, each computed as an exponentiation by `(p+1)/4`. Each step depends on the previous
//! one, so the evaluation cannot be parallelized. Verification undoes the chain with `t` plain
//! modular squarings, which is cheaper by a factor of roughly the bit length of `p`, and accepts
//! the claimed output up to the inherent sign ambiguity of square roots. The output is intended
//! as unbiased public beacon randomness; there is no succinct proof, verification is direct
//! recomputation in the fast direction.
//!
//! Note that the underlying big integer arithmetic is not constant-time. All inputs to a beacon
//! are public, so this is not a limitation for the intended use case, but the crate should not
//! be used with secret inputs.
#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]

pub mod error;
pub mod math;
pub mod modulus;
pub mod vdf;

pub(crate) mod biguint_serde;
