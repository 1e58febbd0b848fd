//! The render pipeline behind the CLI.
//!
//! Reads the code and art inputs, tokenizes, parses or converts the art,
//! validates, runs the layout engine, and writes the woven output. Missing
//! or unreadable inputs are not fatal; they read as empty content.

use std::fs;
use std::process;

use crate::art::{decode_utf8_skip, grid_from_image, parse_art, DensityMap, DensityOverrides, ImageGridOptions};
use crate::error::Result;
use crate::layout::LayoutEngine;
use crate::lex::{strip_comments, tokenize};
use crate::output::{count, Printer, Tone};
use crate::validate::{has_errors, print_diagnostics, validate_inputs};

use super::Cli;

pub fn run(args: Cli, printer: &Printer) -> Result<()> {
    // Inputs read as empty when missing or unreadable.
    let code_bytes = fs::read(&args.code).unwrap_or_default();
    let code_text = decode_utf8_skip(&code_bytes);

    let stripped = strip_comments(&code_text);
    let tokens = tokenize(&stripped);

    let mut map = DensityMap::binary();
    if let Some(path) = &args.density {
        let overrides = DensityOverrides::load(path)?;
        overrides.apply(&mut map);
        printer.line(
            Tone::Note,
            "Density",
            &format!(
                "{} from {}",
                count(overrides.chars.len(), "override"),
                path.display()
            ),
        );
    }

    let grid = if let Some(image_path) = &args.art_image {
        let opts = ImageGridOptions {
            width: args.width.map(|w| w as u32),
            height: args.height.map(|h| h as u32),
            y_aspect: args.y_aspect,
            threshold: args.threshold,
            invert: args.invert,
        };
        grid_from_image(image_path, &opts)?
    } else {
        let art_bytes = args
            .art
            .as_ref()
            .map(|p| fs::read(p).unwrap_or_default())
            .unwrap_or_default();
        parse_art(
            &art_bytes,
            args.width.map(|w| w as usize),
            args.height.map(|h| h as usize),
            &map,
        )
    };

    if args.dump_meta {
        eprintln!("W={} H={}, tokens={}", grid.width(), grid.height(), tokens.len());
    }

    let findings = validate_inputs(&tokens, &grid);
    print_diagnostics(&findings, printer);
    if has_errors(&findings) {
        process::exit(1);
    }

    printer.line(
        Tone::Step,
        "Weaving",
        &format!(
            "{} into {}x{} cells",
            count(tokens.len(), "token"),
            grid.width(),
            grid.height()
        ),
    );

    let mut engine = match args.seed {
        Some(seed) => LayoutEngine::with_seed(&grid, &map, seed),
        None => LayoutEngine::new(&grid, &map),
    };
    let woven = engine.render(&tokens);

    // Creation failures surface as open failures just below.
    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = fs::create_dir_all(parent);
        }
    }

    if let Err(e) = fs::write(&args.out, woven.as_bytes()) {
        printer.line(
            Tone::Fail,
            "Failed",
            &format!("to open --out path {}: {}", args.out.display(), e),
        );
        process::exit(3);
    }

    printer.line(
        Tone::Step,
        "Wrote",
        &format!(
            "{} ({})",
            args.out.display(),
            count(woven.lines().count(), "line")
        ),
    );

    Ok(())
}
