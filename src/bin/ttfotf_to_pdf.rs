//! Generate a PDF showing every glyph of a TrueType/OpenType font.
//!
//! Usage:
//!   cargo run --release --bin ttfotf_to_pdf -- <font file> <output .pdf path>

use font2pdf::cli::{self, Outcome};
use font2pdf::FontKind;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    match cli::run(FontKind::OpenType, &args, &mut std::io::stdout()) {
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
