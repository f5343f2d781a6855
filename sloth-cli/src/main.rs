// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use num_bigint::BigUint;
use sloth_vdf::modulus::{SlothModulus, MODULUS_256};
use sloth_vdf::vdf::sloth::SlothVDF;
use sloth_vdf::vdf::VDF;
use std::io::{Error, ErrorKind};
use std::str::FromStr;
use std::time::Instant;

/// Default bit length for sampled moduli. The sloth construction offers no asymptotic security
/// argument tied to the modulus size; 256 bits keeps a single square-root step cheap while making
/// accidental collisions of beacon values negligible.
const DEFAULT_MODULUS_BIT_LENGTH: usize = 256;

#[derive(Parser)]
#[command(name = "sloth-cli")]
#[command(about = "Verifiable delay function based on iterated modular square roots (sloth)", long_about = None)]
enum Command {
    /// Sample a modulus (a prime congruent to 3 mod 4) from a seed.
    SampleModulus(SampleModulusArguments),

    /// Compute the delay function output.
    Evaluate(EvaluateArguments),

    /// Verify an output against an input and iteration count.
    Verify(VerifyArguments),
}

#[derive(Parser, Clone)]
struct SampleModulusArguments {
    /// The hex encoded seed.
    #[clap(short, long)]
    seed: String,

    /// Bit length of the modulus (default is 256).
    #[clap(short, long, default_value_t = DEFAULT_MODULUS_BIT_LENGTH)]
    bit_length: usize,
}

#[derive(Parser, Clone)]
struct EvaluateArguments {
    /// The modulus as a decimal string. Defaults to the built-in 256-bit modulus.
    #[clap(short, long)]
    modulus: Option<String>,

    /// The decimal encoded input to the VDF.
    #[clap(long)]
    input: String,

    /// The number of iterations.
    #[clap(long)]
    iterations: u64,
}

#[derive(Parser, Clone)]
struct VerifyArguments {
    /// The modulus as a decimal string. Defaults to the built-in 256-bit modulus.
    #[clap(short, long)]
    modulus: Option<String>,

    /// The number of iterations.
    #[clap(long)]
    iterations: u64,

    /// The decimal encoded input to the VDF.
    #[clap(long)]
    input: String,

    /// The decimal encoded output of the VDF.
    #[clap(short, long)]
    output: String,
}

fn main() {
    let start = Instant::now();
    match execute(Command::parse()) {
        Ok(res) => {
            println!("{}", res);
            eprintln!("Elapsed: {:.3}s", start.elapsed().as_secs_f64());
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(exitcode::DATAERR);
        }
    }
}

fn parse_modulus(modulus: &Option<String>) -> Result<SlothModulus, Error> {
    match modulus {
        Some(s) => SlothModulus::from_str(s).map_err(|_| {
            Error::new(
                ErrorKind::InvalidInput,
                "Invalid modulus. Expected a prime congruent to 3 mod 4.",
            )
        }),
        None => Ok(MODULUS_256.clone()),
    }
}

fn parse_element(s: &str) -> Result<BigUint, Error> {
    BigUint::from_str(s).map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid number."))
}

fn execute(cmd: Command) -> Result<String, Error> {
    match cmd {
        Command::SampleModulus(arguments) => {
            let seed = hex::decode(arguments.seed)
                .map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid seed."))?;
            let modulus = SlothModulus::from_seed(&seed, arguments.bit_length)
                .map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid bit length."))?;
            let mut result = "Modulus: ".to_string();
            result.push_str(&modulus.value().to_string());
            Ok(result)
        }

        Command::Evaluate(arguments) => {
            let modulus = parse_modulus(&arguments.modulus)?;
            let input = parse_element(&arguments.input)?;

            let vdf = SlothVDF::new(modulus, arguments.iterations);
            let output = vdf
                .evaluate(&input)
                .map_err(|_| Error::new(ErrorKind::Other, "VDF evaluation failed"))?;

            let mut result = "Output: ".to_string();
            result.push_str(&output.to_string());
            Ok(result)
        }

        Command::Verify(arguments) => {
            let modulus = parse_modulus(&arguments.modulus)?;
            let input = parse_element(&arguments.input)?;
            let output = parse_element(&arguments.output)?;

            let vdf = SlothVDF::new(modulus, arguments.iterations);
            let verifies = vdf.verify(&input, &output).is_ok();

            let mut result = "Verified: ".to_string();
            result.push_str(&verifies.to_string());
            Ok(result)
        }
    }
}
