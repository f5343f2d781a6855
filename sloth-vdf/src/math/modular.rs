// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use num_bigint::BigUint;
use num_traits::One;

/// Check whether `a` is a quadratic residue modulo the odd prime `p` using Euler's criterion,
/// e.g. whether `a^((p-1)/2) = 1 (mod p)`. This function does not check that `p` is prime and
/// if it is not, the result is undefined.
///
/// Returns false for `a = 0 (mod p)`, which is a square but not a unit, so callers probing for
/// the existence of square roots of zero must handle that case themselves.
pub fn is_quadratic_residue(a: &BigUint, p: &BigUint) -> bool {
    a.modpow(&((p - 1u8) >> 1), p).is_one()
}
