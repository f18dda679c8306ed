use std::env;
use std::fs;
use std::time::Instant;

use log::{error, info};

use huffman_text::{bits_to_string, compress_text, entropy_from_freq};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        error!("Usage: {} <input_file> [--tree] [--quiet]", args[0]);
        eprintln!("  📂 <input_file>: path to the text to encode.");
        eprintln!("  🌳 --tree:       print the Huffman tree.");
        eprintln!("  🤫 --quiet:      do not print the bit stream.");
        std::process::exit(1);
    }

    let input_filepath = &args[1];
    let mut show_tree = false;
    let mut quiet = false;
    for arg in &args[2..] {
        match arg.as_str() {
            "--tree" => show_tree = true,
            "--quiet" => quiet = true,
            other => info!("Ignoring unknown argument: {}", other),
        }
    }

    info!("--- Start Encoding ---");
    info!("Reading input file: {}", input_filepath);
    let text = match fs::read_to_string(input_filepath) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read input file: {}", e);
            std::process::exit(1);
        }
    };

    let start_time = Instant::now();
    let compressed = match compress_text(&text) {
        Ok(c) => c,
        Err(e) => {
            error!("Could not encode {}: {}", input_filepath, e);
            std::process::exit(1);
        }
    };
    info!("Pipeline finished in {:.2?}.", start_time.elapsed());

    println!("Frequencies:");
    for (character, freq) in compressed.frequencies.iter() {
        let code = compressed
            .codes
            .get(&character)
            .map(String::as_str)
            .unwrap_or("?");
        println!("  {:?} x{} => {}", character, freq, code);
    }

    if show_tree {
        println!("\nTree:\n{}", compressed.tree.render());
    }

    if !quiet {
        println!("\nEncoded:\n{}", bits_to_string(&compressed.bits));
        println!("\nDecoded:\n{}", compressed.decoded);
    }

    let round_trip = if compressed.decoded == text { "✅" } else { "❌" };
    println!(
        "\r\n{} round trip.\n\
         📂  Input:       {} ({} characters)\n\
         💾  Encoded:     {} bits\n\
         ℹ️  Entropy:     {:.4} bits/symbol\n\
         🗜️  Average:     {:.4} bits/symbol",
        round_trip,
        input_filepath,
        compressed.frequencies.total(),
        compressed.bits.len(),
        entropy_from_freq(&compressed.frequencies),
        compressed.average_code_length()
    );

    info!("--- End ---");
}
