// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

// All parameter validation happens at the boundary, before a delay computation or a verification
// enters its sequential loop. Once the loop is running, the arithmetic is total over the prime
// field and no further error conditions arise.

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SlothError {
    #[error("The modulus is not a prime congruent to 3 mod 4")]
    InvalidModulus,

    #[error("Invalid value was given to the function")]
    InvalidInput,

    #[error("The output is not consistent with the input and iteration count")]
    InvalidProof,
}

pub type SlothResult<T> = Result<T, SlothError>;
