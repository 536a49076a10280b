//! DSR CLI — the command-line entry point for the Dossier archive terminal.
//!
//! # Usage
//!
//! ```text
//! dsr                      launch the terminal
//! dsr --skip-boot          jump straight to the login screen
//! dsr --no-sound           start with sounds off
//! dsr --config-dir <dir>   use a specific config directory
//! ```

use std::path::PathBuf;
use std::process;

use dossier_core::auth::LocalAuth;
use dsr_tui::tui::{Tui, TuiOptions};


fn main() {
    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let cli = match parse_args(&arg_refs) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("dsr: {}", e);
            process::exit(2);
        }
    };

    if cli.help {
        print!("{}", usage());
        return;
    }

    let config_dir = cli.config_dir.unwrap_or_else(resolve_config_dir);
    if let Err(e) = std::fs::create_dir_all(&config_dir) {
        eprintln!("dsr: cannot create {}: {}", config_dir.display(), e);
        process::exit(1);
    }

    let options = TuiOptions {
        config_dir,
        no_sound: cli.no_sound,
        skip_boot: cli.skip_boot,
    };
    let auth = Box::new(LocalAuth::new());

    match Tui::new(options, auth) {
        Ok(mut tui) => {
            if let Err(e) = tui.run() {
                eprintln!("dsr: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("dsr: failed to start: {}", e);
            process::exit(1);
        }
    }
}


#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config_dir: Option<PathBuf>,
    no_sound: bool,
    skip_boot: bool,
    help: bool,
}

fn parse_args(args: &[&str]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--config-dir" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--config-dir requires a path".to_string())?;
                cli.config_dir = Some(PathBuf::from(value));
            }
            "--no-sound" => cli.no_sound = true,
            "--skip-boot" => cli.skip_boot = true,
            "--help" | "-h" => cli.help = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(cli)
}

fn usage() -> String {
    concat!(
        "dsr — Dossier archive terminal\n",
        "\n",
        "Usage: dsr [options]\n",
        "\n",
        "Options:\n",
        "  --config-dir <dir>  Config directory (default: ~/.config/dossier,\n",
        "                      override with DSR_CONFIG_DIR)\n",
        "  --no-sound          Start with interface sounds disabled\n",
        "  --skip-boot         Skip the boot sequence\n",
        "  -h, --help          Show this help\n",
    )
    .to_string()
}

fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DSR_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".config").join("dossier")
}
