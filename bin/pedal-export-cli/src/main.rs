// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # pedal-export
//!
//! Command-line exporter for trained PedalNet models.
//!
//! ## Usage
//! ```bash
//! # Convert a model to WaveNetVA JSON
//! pedal-export convert --model ./models/pedalnet --output converted_model.json
//!
//! # Inspect a checkpoint's hyperparameters and tensors
//! pedal-export inspect --model ./models/pedalnet
//!
//! # Compare a conversion against a known-good reference document
//! pedal-export validate --model ./models/pedalnet --reference wavenetva1.json
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pedal-export",
    about = "Exports PedalNet checkpoints to the WaveNetVA plugin's JSON model format",
    version
)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a model directory to a WaveNetVA JSON document.
    Convert {
        /// Path to the model directory (default "./models/pedalnet").
        #[arg(short, long)]
        model: Option<std::path::PathBuf>,

        /// Path of the JSON document to write (default "converted_model.json").
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Weight axis permutation, e.g. "2,1,0".
        #[arg(long)]
        axes: Option<String>,

        /// Numeric token format: quoted, native.
        #[arg(long)]
        numbers: Option<String>,

        /// Pretty-print the output JSON.
        #[arg(long)]
        pretty: bool,

        /// Path to a TOML configuration file (CLI flags take precedence).
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },

    /// Inspect a checkpoint: hyperparameters, dilation schedule, tensors.
    Inspect {
        /// Path to the model directory.
        #[arg(short, long, default_value = "./models/pedalnet")]
        model: std::path::PathBuf,
    },

    /// Convert in memory and compare against a reference JSON document.
    Validate {
        /// Path to the model directory.
        #[arg(short, long, default_value = "./models/pedalnet")]
        model: std::path::PathBuf,

        /// Path to the known-good reference document.
        #[arg(short, long)]
        reference: std::path::PathBuf,

        /// Weight axis permutation to test, e.g. "0,1,2".
        #[arg(long)]
        axes: Option<String>,

        /// Maximum allowed absolute value difference.
        #[arg(long, default_value_t = 1e-5)]
        tolerance: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            model,
            output,
            axes,
            numbers,
            pretty,
            config,
        } => commands::convert::execute(model, output, axes, numbers, pretty, config),
        Commands::Inspect { model } => commands::inspect::execute(model),
        Commands::Validate {
            model,
            reference,
            axes,
            tolerance,
        } => commands::validate::execute(model, reference, axes, tolerance),
    }
}
