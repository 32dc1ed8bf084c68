// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/ancilla

//! Example: hide a file in an MP3 and recover it again.
use std::fs;
use std::path::Path;

use ancilla::StegoConfig;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: hide <carrier.mp3> <secret-file> <key> [lsb_bits]");
        eprintln!("       hide --reveal <stego.mp3> <key> [lsb_bits]");
        std::process::exit(1);
    }

    if args[1] == "--reveal" {
        let stego = fs::read(&args[2]).expect("Could not read stego MP3");
        let config = make_config(&args[3], args.get(4), String::new());
        match ancilla::extract(&stego, &config) {
            Ok(secret) => {
                let out = if secret.filename.is_empty() {
                    "secret.out".to_string()
                } else {
                    secret.filename.clone()
                };
                fs::write(&out, &secret.data).expect("Could not write secret");
                println!("Recovered {} bytes into: {}", secret.data.len(), out);
            }
            Err(e) => eprintln!("Reveal failed: {e}"),
        }
    } else {
        let carrier = fs::read(&args[1]).expect("Could not read carrier MP3");
        let secret = fs::read(&args[2]).expect("Could not read secret file");
        let filename = Path::new(&args[2])
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let config = make_config(&args[3], args.get(4), filename);

        match ancilla::capacity(&carrier, &config) {
            Ok(cap) => println!("Carrier capacity: {cap} bytes"),
            Err(e) => {
                eprintln!("Capacity check failed: {e}");
                std::process::exit(1);
            }
        }

        let stego = ancilla::embed(&carrier, &secret, &config).expect("Embed failed");

        let out_path = args[1].replace(".mp3", "_stego.mp3").replace(".MP3", "_stego.mp3");
        fs::write(&out_path, &stego).expect("Could not write output");
        println!("Stego MP3 written to: {out_path}");
        println!("Carrier: {} bytes, Stego: {} bytes", carrier.len(), stego.len());
    }
}

fn make_config(key: &str, lsb_bits: Option<&String>, filename: String) -> StegoConfig {
    let lsb_bits = lsb_bits.and_then(|s| s.parse().ok()).unwrap_or(1);
    let mut config = StegoConfig::new(key, lsb_bits);
    config.use_encryption = true;
    config.use_random_start = true;
    config.secret_filename = filename;
    config
}
