use clap::Parser;
use floodsense_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {}", e);
            process::exit(1);
        }
    };

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(floodsense_processor::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided
fn show_help_and_commands() {
    println!("FloodSense Processor - Flood Sensor Telemetry Cleaner");
    println!("=====================================================");
    println!();
    println!("Clean ultrasonic flood-sensor telemetry into trustworthy water-depth");
    println!("records and validity flags.");
    println!();
    println!("USAGE:");
    println!("    floodsense-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Run the batch cleaning pipeline over a readings file");
    println!("    validate    Replay readings through the streaming validator");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Clean a readings file, keeping only the clean set:");
    println!("    floodsense-processor process -i readings.jsonl -o clean.jsonl");
    println!();
    println!("    # Keep all records, including rejected ones, with custom thresholds:");
    println!("    floodsense-processor process -i readings.jsonl -o all.jsonl \\");
    println!("                                 --all-records --config thresholds.json");
    println!();
    println!("    # Replay streaming validation, calibrating on each sensor's first reading:");
    println!("    floodsense-processor validate -i readings.jsonl -o verdicts.jsonl \\");
    println!("                                  --calibrate-first");
    println!();
    println!("For detailed help on any command, use:");
    println!("    floodsense-processor <COMMAND> --help");
}
