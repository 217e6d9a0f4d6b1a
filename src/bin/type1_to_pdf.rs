//! Generate a single-page PDF showing every glyph of a Type 1 font.
//!
//! Usage:
//!   cargo run --release --bin type1_to_pdf -- <.pfb font file> <output .pdf path>

use font2pdf::cli::{self, Outcome};
use font2pdf::FontKind;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    match cli::run(FontKind::Type1, &args, &mut std::io::stdout()) {
        Ok(Outcome::Written(_)) => ExitCode::SUCCESS,
        Ok(Outcome::Usage(usage)) => {
            println!("{}", usage);
            ExitCode::from(1)
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        },
    }
}
