use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chemformula::{Composition, Formula, FormulaError};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "hill",
    about = "Rewrite chemical formulae in Hill order",
    version
)]
struct Cli {
    /// Formulae to rewrite (one per line from stdin if omitted)
    #[arg(value_name = "FORMULA")]
    formulas: Vec<String>,

    /// Print element counts instead of the Hill formula
    #[arg(short, long)]
    counts: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    match run(&cli, stdin, &mut stdout, &mut stderr) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            let _ = writeln!(stderr, "error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every formula parsed. `input` is read only when no
/// formulae were given as arguments.
fn run(
    cli: &Cli,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    let inputs = if cli.formulas.is_empty() {
        read_formulas(input)?
    } else {
        cli.formulas.clone()
    };

    let mut all_ok = true;
    for text in &inputs {
        match Formula::parse(text) {
            Ok(formula) => write_formula(out, &formula, cli.counts)
                .with_context(|| format!("failed to write result for '{text}'"))?,
            Err(e) => {
                print_error(err, &e)
                    .with_context(|| format!("failed to report error for '{text}'"))?;
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

/// One formula per non-blank line.
fn read_formulas(input: impl BufRead) -> Result<Vec<String>> {
    let mut formulas = Vec::new();
    for line in input.lines() {
        let line = line.context("failed to read formulae from stdin")?;
        if !line.trim().is_empty() {
            formulas.push(line);
        }
    }
    Ok(formulas)
}

fn write_formula(out: &mut impl Write, formula: &Formula, counts: bool) -> io::Result<()> {
    writeln!(out, "{formula}")?;
    if counts {
        for (symbol, quantity) in formula.iter() {
            writeln!(out, "{symbol}\t{quantity}")?;
        }
    }
    Ok(())
}

fn print_error(out: &mut impl Write, err: &FormulaError) -> io::Result<()> {
    writeln!(out, "error: {err}")?;
    for line in err.caret().lines() {
        writeln!(out, "    {line}")?;
    }
    Ok(())
}
