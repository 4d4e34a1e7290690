//! Renders the `pdfstitch(1)` man page into `OUT_DIR` from the CLI definition.

use std::{env, fs, io, path::PathBuf};

use clap::CommandFactory;

#[path = "src/cli.rs"]
mod cli;

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or(io::ErrorKind::NotFound)?;

    let command = cli::Cli::command();
    let page_name = format!("{}.1", command.get_name());

    let mut page = Vec::new();
    clap_mangen::Man::new(command).render(&mut page)?;
    fs::write(out_dir.join(page_name), page)
}
