// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::error::SlothError::{InvalidInput, InvalidProof};
use crate::error::SlothResult;
use crate::modulus::SlothModulus;
use crate::vdf::VDF;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// An implementation of the sloth VDF (https://eprint.iacr.org/2015/366) over a prime field.
///
/// Evaluating applies `iterations` sequential modular square-root extractions, each an
/// exponentiation by `(p+1)/4`, so the total work is `iterations * O(log p)` modular
/// multiplications with a strict data dependency between steps. Verification squares the claimed
/// output `iterations` times, one multiplication per step, and accepts if the result is the
/// reduced input or its negation; square roots are only determined up to sign, and the engine
/// does not canonicalize the sign at each step.
#[derive(Debug)]
pub struct SlothVDF {
    modulus: SlothModulus,
    iterations: u64,
}

impl SlothVDF {
    /// Create a new VDF over the field defined by the given modulus. Evaluating this VDF
    /// requires `iterations` sequential square-root extractions. An iteration count of zero is
    /// the identity delay: the output is the reduced input.
    pub fn new(modulus: SlothModulus, iterations: u64) -> Self {
        Self {
            modulus,
            iterations,
        }
    }

    pub fn modulus(&self) -> &SlothModulus {
        &self.modulus
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Begin a stepwise evaluation of this VDF on the given input. This allows the caller to
    /// advance the computation in bounded slices, checking a cancellation condition and taking
    /// checkpoints in between. [SlothVDF::evaluate] is equivalent to running the evaluator to
    /// completion in one slice.
    pub fn evaluator(&self, input: &BigUint) -> SlothEvaluator<'_> {
        SlothEvaluator::new(self, input)
    }

    /// Restore a stepwise evaluation from a checkpoint taken with [SlothEvaluator::checkpoint].
    /// Fails with `InvalidInput` if the checkpoint does not belong to a VDF with this modulus
    /// and iteration count.
    pub fn resume(&self, checkpoint: &SlothCheckpoint) -> SlothResult<SlothEvaluator<'_>> {
        SlothEvaluator::resume(self, checkpoint)
    }
}

impl VDF for SlothVDF {
    type InputType = BigUint;
    type OutputType = BigUint;

    fn evaluate(&self, input: &BigUint) -> SlothResult<BigUint> {
        let mut evaluator = self.evaluator(input);
        evaluator.run(self.iterations);
        evaluator.output()
    }

    fn verify(&self, input: &BigUint, output: &BigUint) -> SlothResult<()> {
        if output >= self.modulus.value() {
            return Err(InvalidInput);
        }

        let mut value = output.clone();
        for _ in 0..self.iterations {
            value = self.modulus.square(&value);
        }

        // The two square roots of a residue are negatives of each other, so after undoing the
        // chain the result must match the reduced input up to sign.
        let reduced = self.modulus.reduce(input);
        if value == reduced || value == self.modulus.value() - &reduced {
            Ok(())
        } else {
            Err(InvalidProof)
        }
    }
}

/// An in-progress sloth evaluation.
///
/// The delay chain can run for a long wall-clock time, so rather than forcing callers to block
/// in [SlothVDF::evaluate], the evaluator exposes the loop in bounded slices. Between slices the
/// caller may abort, or persist a [SlothCheckpoint] and continue later on another instance;
/// resuming from a checkpoint yields the same output as an uninterrupted run.
#[derive(Debug)]
pub struct SlothEvaluator<'a> {
    vdf: &'a SlothVDF,
    state: BigUint,
    iterations_done: u64,
}

impl<'a> SlothEvaluator<'a> {
    fn new(vdf: &'a SlothVDF, input: &BigUint) -> Self {
        Self {
            vdf,
            state: vdf.modulus.reduce(input),
            iterations_done: 0,
        }
    }

    fn resume(vdf: &'a SlothVDF, checkpoint: &SlothCheckpoint) -> SlothResult<Self> {
        if checkpoint.iterations_done > vdf.iterations
            || &checkpoint.value >= vdf.modulus.value()
        {
            return Err(InvalidInput);
        }
        Ok(Self {
            vdf,
            state: checkpoint.value.clone(),
            iterations_done: checkpoint.iterations_done,
        })
    }

    /// Advance the evaluation by up to `max_steps` square-root steps and return true if the
    /// evaluation is now complete.
    pub fn run(&mut self, max_steps: u64) -> bool {
        let steps = max_steps.min(self.vdf.iterations - self.iterations_done);
        for _ in 0..steps {
            self.state = self.vdf.modulus.sqrt_step(&self.state);
        }
        self.iterations_done += steps;
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.iterations_done == self.vdf.iterations
    }

    pub fn iterations_done(&self) -> u64 {
        self.iterations_done
    }

    /// Capture the intermediate state as a serializable checkpoint.
    pub fn checkpoint(&self) -> SlothCheckpoint {
        SlothCheckpoint {
            value: self.state.clone(),
            iterations_done: self.iterations_done,
        }
    }

    /// Consume the evaluator and return the output. Fails with `InvalidInput` if the evaluation
    /// has not run to completion.
    pub fn output(self) -> SlothResult<BigUint> {
        if !self.is_complete() {
            return Err(InvalidInput);
        }
        Ok(self.state)
    }
}

/// A snapshot of a partial sloth evaluation: the intermediate chain value and the number of
/// square-root steps already performed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlothCheckpoint {
    #[serde(with = "crate::biguint_serde")]
    value: BigUint,
    iterations_done: u64,
}

impl SlothCheckpoint {
    pub fn iterations_done(&self) -> u64 {
        self.iterations_done
    }
}
