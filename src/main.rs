use std::path::Path;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--print-job") {
        let job = fontatlas::Job::sample();
        match toml::to_string_pretty(&job) {
            Ok(s) => print!("{s}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("fontatlas {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.iter().any(|a| a == "--help" || a == "-h") || args.len() < 2 {
        println!("fontatlas {}", env!("CARGO_PKG_VERSION"));
        println!("A font glyph atlas builder\n");
        println!("USAGE:");
        println!("    fontatlas [OPTIONS] <job.toml>\n");
        println!("OPTIONS:");
        println!("    --print-job       Print a sample job description to stdout");
        println!("    --version, -V     Print version information");
        println!("    --help, -h        Print this help message");
        return;
    }

    if let Err(e) = run(&args[1]) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(path: &str) -> Result<(), String> {
    let job = fontatlas::Job::load(Path::new(path))?;
    let params = job.build_params()?;

    let mut builder = fontatlas::Builder::new();
    for font in &job.fonts {
        // A conflicting or unreadable font declaration does not sink the
        // job; the build proceeds with the fonts that did register.
        if let Err(e) = builder.add_font(&font.name, &font.path, font.face_index, font.pixel_size)
        {
            log::warn!("skipping font {:?}: {e}", font.name);
            continue;
        }
        for &code in &font.codes {
            builder
                .add_code(&font.name, code)
                .map_err(|e| e.to_string())?;
        }
        for &(first, last) in &font.ranges {
            builder
                .add_range(&font.name, first, last)
                .map_err(|e| e.to_string())?;
        }
        if !font.text.is_empty() {
            builder
                .add_text(&font.name, &font.text)
                .map_err(|e| e.to_string())?;
        }
    }

    let report = builder.build(&params).map_err(|e| e.to_string())?;
    log::info!(
        "packed {} glyphs from {} fonts onto {} pages",
        report
            .fonts
            .iter()
            .map(|f| f.glyphs.len())
            .sum::<usize>(),
        report.fonts.len(),
        report.pages
    );
    Ok(())
}
