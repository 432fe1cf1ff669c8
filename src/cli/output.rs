//! Terminal rendering of command results.
//!
//! `colored` honors NO_COLOR, CLICOLOR and CLICOLOR_FORCE.

use std::fmt::Display;
use std::path::Path;

use colored::Colorize;

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Title line for a dataset or tree.
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Summary line of a batch run, e.g. `Built: 2 trees into out`.
pub fn summary(label: &str, msg: &(impl Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// One exported file of a batch run.
pub fn written(path: &Path) {
    println!("  {} {}", "✓".green(), path.display());
}

/// Attribute line of a statistics listing; the best split is highlighted.
pub fn attribute_gain(name: &str, gain: f64, best: bool) {
    if best {
        println!("{}: gain {:.3} {}", name.green().bold(), gain, "(best)".green());
    } else {
        println!("{}: gain {:.3}", name.green(), gain);
    }
}

pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

/// Uncolored output meant for piping.
pub fn plain(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
